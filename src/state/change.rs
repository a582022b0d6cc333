//! Explicit state-change requests.
//!
//! Setters that accept "either a new value or a function of the previous
//! value" are modeled as a tagged variant instead of a duck-typed
//! callback parameter.

/// A request to change a piece of state.
pub enum Change<T> {
    /// Replace the value outright.
    Set(T),
    /// Derive the new value from the old one.
    Update(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Change<T> {
    /// Resolve the request against the current value.
    pub fn apply(self, current: &T) -> T {
        match self {
            Change::Set(value) => value,
            Change::Update(f) => f(current),
        }
    }

    /// Convenience constructor for the update case.
    pub fn update(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Change::Update(Box::new(f))
    }
}

impl<T> std::fmt::Debug for Change<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::Set(value) => f.debug_tuple("Set").field(value).finish(),
            Change::Update(_) => f.write_str("Update(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ignores_current_value() {
        let change: Change<i32> = Change::Set(5);
        assert_eq!(change.apply(&100), 5);
    }

    #[test]
    fn update_derives_from_current_value() {
        let change: Change<i32> = Change::update(|old| old + 1);
        assert_eq!(change.apply(&100), 101);
    }

    #[test]
    fn update_can_capture_environment() {
        let delta = 7;
        let change: Change<Vec<i32>> = Change::update(move |old: &Vec<i32>| {
            let mut next = old.clone();
            next.push(delta);
            next
        });
        assert_eq!(change.apply(&vec![1, 2]), vec![1, 2, 7]);
    }

    #[test]
    fn debug_formats_both_variants() {
        assert_eq!(format!("{:?}", Change::Set(1)), "Set(1)");
        let update: Change<i32> = Change::update(|v| *v);
        assert_eq!(format!("{update:?}"), "Update(..)");
    }
}
