use std::fmt;
use std::rc::Rc;

use crate::error::BoxError;

pub type Markup = String;

type ProduceFn = dyn Fn() -> Result<Markup, BoxError>;

/// A named, argument-free function producing the markup of one page.
///
/// Producers may read ambient state but must not touch router state; calling
/// one twice yields equivalent markup.
#[derive(Clone)]
pub struct Page {
    name: &'static str,
    produce: Rc<ProduceFn>,
}

impl Page {
    pub fn new<F>(name: &'static str, produce: F) -> Self
    where
        F: Fn() -> Markup + 'static,
    {
        Self {
            name,
            produce: Rc::new(move || Ok(produce())),
        }
    }

    /// A producer that can fail. The error surfaces from `render`.
    pub fn fallible<F>(name: &'static str, produce: F) -> Self
    where
        F: Fn() -> Result<Markup, BoxError> + 'static,
    {
        Self {
            name,
            produce: Rc::new(produce),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn produce(&self) -> Result<Markup, BoxError> {
        (self.produce)()
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page").field("name", &self.name).finish()
    }
}
