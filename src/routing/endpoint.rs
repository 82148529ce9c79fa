//! The control endpoint seam.
//!
//! The endpoint is the single authoritative consumer that turns actions into
//! real recording and screenshot behavior. It lives in the host application;
//! this crate only delivers to it.

use crate::error::RecBarResult;

use super::Action;

/// Consumer of routed actions.
///
/// `deliver` is called from the router's delivery thread, one action at a
/// time, in acceptance order. Returning an error puts the action back at the
/// head of the queue and detaches the endpoint until the next attach.
/// Actions may arrive more than once across such replays; use `Action::id`
/// to de-duplicate.
pub trait ControlEndpoint: Send + Sync {
    fn deliver(&self, action: &Action) -> RecBarResult<()>;

    /// Name used in logs
    fn name(&self) -> &str {
        "endpoint"
    }
}

/// Adapter so plain closures can act as endpoints.
pub struct FnEndpoint<F> {
    name: String,
    f: F,
}

impl<F> FnEndpoint<F>
where
    F: Fn(&Action) -> RecBarResult<()> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> ControlEndpoint for FnEndpoint<F>
where
    F: Fn(&Action) -> RecBarResult<()> + Send + Sync,
{
    fn deliver(&self, action: &Action) -> RecBarResult<()> {
        (self.f)(action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
