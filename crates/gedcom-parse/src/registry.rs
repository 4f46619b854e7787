//! Hook registration and dispatch.

use std::collections::HashMap;
use std::fmt;

use crate::error::{HookError, UsageError};
use crate::stack::Context;

/// A registered hook.
pub(crate) type Hook<'h> = Box<dyn FnMut(&str, &Context<'_>) -> Result<(), HookError> + 'h>;

/// When a hook fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// When a record is opened.
    Before,
    /// When a record is closed, after all of its children.
    After,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Before => f.write_str("before"),
            Phase::After => f.write_str("after"),
        }
    }
}

/// Full path of tags from the outermost open record to the innermost.
///
/// A path only matches when exactly these records are open: `[SUBM, ADDR]`
/// never matches an `ADDR` that sits deeper, or one that stands alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagPath(Vec<String>);

impl TagPath {
    /// Create a path from its tags, outermost first.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// The tags of this path.
    pub fn tags(&self) -> &[String] {
        &self.0
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Which dispatches a hook listens to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Every dispatch of the phase, wherever it happens.
    Any,
    /// Dispatches whose open records are exactly this path.
    Path(TagPath),
}

impl From<TagPath> for Selector {
    fn from(path: TagPath) -> Self {
        Selector::Path(path)
    }
}

impl From<&str> for Selector {
    fn from(tag: &str) -> Self {
        Selector::Path(TagPath::new([tag]))
    }
}

impl From<String> for Selector {
    fn from(tag: String) -> Self {
        Selector::Path(TagPath::new([tag]))
    }
}

impl<const N: usize> From<[&str; N]> for Selector {
    fn from(tags: [&str; N]) -> Self {
        Selector::Path(TagPath::new(tags))
    }
}

impl From<&[&str]> for Selector {
    fn from(tags: &[&str]) -> Self {
        Selector::Path(TagPath::new(tags.iter().copied()))
    }
}

impl From<Vec<&str>> for Selector {
    fn from(tags: Vec<&str>) -> Self {
        Selector::Path(TagPath::new(tags))
    }
}

impl From<Vec<String>> for Selector {
    fn from(tags: Vec<String>) -> Self {
        Selector::Path(TagPath(tags))
    }
}

/// Hooks of one phase.
#[derive(Default)]
struct PhaseHooks<'h> {
    by_path: HashMap<Vec<String>, Vec<Hook<'h>>>,
    any: Vec<Hook<'h>>,
}

/// Hooks keyed by phase and tag path, kept in registration order.
#[derive(Default)]
pub struct HookRegistry<'h> {
    before: PhaseHooks<'h>,
    after: PhaseHooks<'h>,
}

impl<'h> HookRegistry<'h> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn phase(&self, phase: Phase) -> &PhaseHooks<'h> {
        match phase {
            Phase::Before => &self.before,
            Phase::After => &self.after,
        }
    }

    fn phase_mut(&mut self, phase: Phase) -> &mut PhaseHooks<'h> {
        match phase {
            Phase::Before => &mut self.before,
            Phase::After => &mut self.after,
        }
    }

    /// Append a hook for `selector`. An empty path could never match and is
    /// rejected.
    pub(crate) fn register(
        &mut self,
        phase: Phase,
        selector: Selector,
        hook: Hook<'h>,
    ) -> Result<(), UsageError> {
        let hooks = self.phase_mut(phase);
        match selector {
            Selector::Any => hooks.any.push(hook),
            Selector::Path(path) if path.is_empty() => return Err(UsageError::EmptyTagPath),
            Selector::Path(TagPath(tags)) => hooks.by_path.entry(tags).or_default().push(hook),
        }
        Ok(())
    }

    /// Number of hooks registered for exactly this selector.
    pub fn count(&self, phase: Phase, selector: &Selector) -> usize {
        let hooks = self.phase(phase);
        match selector {
            Selector::Any => hooks.any.len(),
            Selector::Path(path) => hooks.by_path.get(path.tags()).map_or(0, Vec::len),
        }
    }

    /// Total number of hooks registered for a phase.
    pub fn len(&self, phase: Phase) -> usize {
        let hooks = self.phase(phase);
        hooks.any.len() + hooks.by_path.values().map(Vec::len).sum::<usize>()
    }

    /// Whether no hooks are registered at all.
    pub fn is_empty(&self) -> bool {
        self.len(Phase::Before) == 0 && self.len(Phase::After) == 0
    }

    /// Run the hooks matching the open records in `cx`: exact-path hooks
    /// first, then wildcard hooks. Stops at the first failing hook.
    ///
    /// Returns how many hooks ran.
    pub(crate) fn dispatch(
        &mut self,
        phase: Phase,
        cx: &Context<'_>,
        value: &str,
    ) -> Result<usize, HookError> {
        let tags = cx.tags();
        if tags.is_empty() {
            return Ok(0);
        }

        let hooks = self.phase_mut(phase);
        let mut fired = 0;
        if let Some(exact) = hooks.by_path.get_mut(tags) {
            for hook in exact.iter_mut() {
                hook(value, cx)?;
                fired += 1;
            }
        }
        for hook in hooks.any.iter_mut() {
            hook(value, cx)?;
            fired += 1;
        }
        Ok(fired)
    }
}

impl fmt::Debug for HookRegistry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("before", &self.len(Phase::Before))
            .field("after", &self.len(Phase::After))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::ContextStack;
    use facet_testhelpers::test;
    use std::cell::RefCell;

    fn stack_of(tags: &[&str]) -> ContextStack {
        let mut stack = ContextStack::new();
        for (level, tag) in tags.iter().enumerate() {
            stack.push(tag, "", level as u32);
        }
        stack
    }

    #[test]
    fn test_selector_conversions() {
        assert_eq!(Selector::from("INDI"), Selector::Path(TagPath::new(["INDI"])));
        assert_eq!(
            Selector::from(["SUBM", "ADDR"]),
            Selector::Path(TagPath::new(["SUBM", "ADDR"]))
        );
        assert_eq!(
            Selector::from(vec!["SUBM".to_string(), "ADDR".to_string()]),
            Selector::from(&["SUBM", "ADDR"][..])
        );
        assert_eq!(TagPath::new(["SUBM", "ADDR"]).to_string(), "SUBM.ADDR");
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut registry = HookRegistry::new();
        let result = registry.register(
            Phase::Before,
            Selector::from(Vec::<String>::new()),
            Box::new(|_, _| Ok(())),
        );
        assert_eq!(result, Err(UsageError::EmptyTagPath));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_count_per_selector() {
        let mut registry = HookRegistry::new();
        for _ in 0..2 {
            registry
                .register(Phase::Before, "INDI".into(), Box::new(|_, _| Ok(())))
                .unwrap();
        }
        registry
            .register(Phase::After, Selector::Any, Box::new(|_, _| Ok(())))
            .unwrap();

        assert_eq!(registry.count(Phase::Before, &"INDI".into()), 2);
        assert_eq!(registry.count(Phase::After, &"INDI".into()), 0);
        assert_eq!(registry.count(Phase::After, &Selector::Any), 1);
        assert_eq!(registry.len(Phase::Before), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_exact_path_then_wildcard_in_registration_order() {
        let calls = RefCell::new(Vec::new());
        let mut registry = HookRegistry::new();
        registry
            .register(
                Phase::Before,
                Selector::Any,
                Box::new(|v, _| {
                    calls.borrow_mut().push(format!("any {v}"));
                    Ok(())
                }),
            )
            .unwrap();
        registry
            .register(
                Phase::Before,
                ["SUBM", "ADDR"].into(),
                Box::new(|v, _| {
                    calls.borrow_mut().push(format!("first {v}"));
                    Ok(())
                }),
            )
            .unwrap();
        registry
            .register(
                Phase::Before,
                ["SUBM", "ADDR"].into(),
                Box::new(|v, _| {
                    calls.borrow_mut().push(format!("second {v}"));
                    Ok(())
                }),
            )
            .unwrap();

        let stack = stack_of(&["SUBM", "ADDR"]);
        let fired = registry
            .dispatch(Phase::Before, &Context::new(&stack, 1), "x")
            .unwrap();
        assert_eq!(fired, 3);
        assert_eq!(*calls.borrow(), ["first x", "second x", "any x"]);
    }

    #[test]
    fn test_path_matches_only_whole_stack() {
        let hits = RefCell::new(0);
        let mut registry = HookRegistry::new();
        registry
            .register(
                Phase::After,
                ["SUBM", "ADDR"].into(),
                Box::new(|_, _| {
                    *hits.borrow_mut() += 1;
                    Ok(())
                }),
            )
            .unwrap();

        for tags in [
            &["ADDR"][..],
            &["SUBM"][..],
            &["SUBM", "ADDR", "CITY"][..],
            &["HEAD", "SUBM", "ADDR"][..],
        ] {
            let stack = stack_of(tags);
            registry
                .dispatch(Phase::After, &Context::new(&stack, 1), "")
                .unwrap();
        }
        assert_eq!(*hits.borrow(), 0);

        let stack = stack_of(&["SUBM", "ADDR"]);
        registry
            .dispatch(Phase::After, &Context::new(&stack, 1), "")
            .unwrap();
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_empty_stack_is_noop() {
        let mut registry = HookRegistry::new();
        registry
            .register(
                Phase::Before,
                Selector::Any,
                Box::new(|_, _| Err("must not run".into())),
            )
            .unwrap();
        let stack = ContextStack::new();
        let fired = registry
            .dispatch(Phase::Before, &Context::new(&stack, 0), "")
            .unwrap();
        assert_eq!(fired, 0);
    }

    #[test]
    fn test_failing_hook_stops_dispatch() {
        let ran_after = RefCell::new(false);
        let mut registry = HookRegistry::new();
        registry
            .register(
                Phase::Before,
                "INDI".into(),
                Box::new(|_, _| Err("broken hook".into())),
            )
            .unwrap();
        registry
            .register(
                Phase::Before,
                Selector::Any,
                Box::new(|_, _| {
                    *ran_after.borrow_mut() = true;
                    Ok(())
                }),
            )
            .unwrap();

        let stack = stack_of(&["INDI"]);
        let err = registry
            .dispatch(Phase::Before, &Context::new(&stack, 1), "")
            .unwrap_err();
        assert_eq!(err.to_string(), "broken hook");
        assert!(!*ran_after.borrow());
    }
}
