//! Process-wide directive registry.
//!
//! Maps directive names to factories. Each document processor instantiates
//! its own handlers from the registry, so handler state never leaks between
//! documents. Registration lasts for the life of the process.
//!
//! `plotly` is registered when the registry is first touched.

use std::collections::BTreeMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use super::LeafDirective;
use crate::plotly::PlotlyDirective;

/// Creates a fresh handler for one document.
pub type DirectiveFactory = fn() -> Box<dyn LeafDirective>;

static REGISTRY: LazyLock<RwLock<BTreeMap<String, DirectiveFactory>>> = LazyLock::new(|| {
    let mut directives: BTreeMap<String, DirectiveFactory> = BTreeMap::new();
    directives.insert(PlotlyDirective::NAME.to_owned(), || {
        Box::new(PlotlyDirective::new())
    });
    RwLock::new(directives)
});

/// Register a directive under `name`, replacing any previous registration.
///
/// # Example
///
/// ```
/// use plotdoc_renderer::directive::{
///     register_directive, registered_directives, DirectiveArgs, DirectiveContext,
///     DirectiveOutput, LeafDirective,
/// };
///
/// struct Divider;
///
/// impl LeafDirective for Divider {
///     fn name(&self) -> &str { "divider" }
///     fn process(&mut self, _args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
///         DirectiveOutput::html("<hr>")
///     }
/// }
///
/// register_directive("divider", || Box::new(Divider));
/// assert!(registered_directives().contains(&"divider".to_owned()));
/// ```
pub fn register_directive(name: &str, factory: DirectiveFactory) {
    let mut directives = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if directives.insert(name.to_owned(), factory).is_some() {
        tracing::debug!(directive = name, "Replaced directive registration");
    }
}

/// Names of all registered directives, sorted.
#[must_use]
pub fn registered_directives() -> Vec<String> {
    let directives = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    directives.keys().cloned().collect()
}

/// Factory registered under `name`.
#[must_use]
pub fn directive_factory(name: &str) -> Option<DirectiveFactory> {
    let directives = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    directives.get(name).copied()
}

/// Instantiate one handler per registered directive, keyed by the name it
/// was registered under.
pub(crate) fn instantiate_all() -> Vec<(String, Box<dyn LeafDirective>)> {
    let directives = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    directives
        .iter()
        .map(|(name, factory)| (name.clone(), factory()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput};

    struct Stamp;

    impl LeafDirective for Stamp {
        fn name(&self) -> &'static str {
            "registry-test-stamp"
        }

        fn process(&mut self, _args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
            DirectiveOutput::html("<span>stamp</span>")
        }
    }

    #[test]
    fn test_plotly_registered_by_default() {
        assert!(registered_directives().contains(&"plotly".to_owned()));
        let factory = directive_factory("plotly").unwrap();
        assert_eq!(factory().name(), "plotly");
    }

    #[test]
    fn test_register_directive() {
        register_directive("registry-test-stamp", || Box::new(Stamp));
        let factory = directive_factory("registry-test-stamp").unwrap();
        assert_eq!(factory().name(), "registry-test-stamp");
        assert!(
            instantiate_all()
                .iter()
                .any(|(name, h)| name == "registry-test-stamp" && h.name() == "registry-test-stamp")
        );
    }

    #[test]
    fn test_alias_keyed_by_registered_name() {
        register_directive("registry-test-alias", || Box::new(PlotlyDirective::new()));
        let handlers = instantiate_all();
        let (_, handler) = handlers
            .iter()
            .find(|(name, _)| name == "registry-test-alias")
            .unwrap();
        assert_eq!(handler.name(), "plotly");
    }

    #[test]
    fn test_unknown_factory() {
        assert!(directive_factory("registry-test-missing").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let names = registered_directives();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
