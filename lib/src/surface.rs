//! Target surfaces.
//!
//! A [`Surface`] is an identity token owned by the host that displays an
//! automaton. The engine never looks inside it; it only records which
//! surfaces already have an automaton bound to them, so that the same
//! surface is never driven by two automata at once.

use crate::error::Error;
use std::{cell::Cell, rc::Rc};

#[derive(Debug)]
struct SurfaceInner {
    name: String,
    bound: Cell<bool>,
}

/// A host-owned surface an automaton can be bound to.
///
/// Clones refer to the same surface.
#[derive(Clone, Debug)]
pub struct Surface {
    inner: Rc<SurfaceInner>,
}

impl Surface {
    /// Creates a new, unbound surface.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Surface {
            inner: Rc::new(SurfaceInner {
                name: name.into(),
                bound: Cell::new(false),
            }),
        }
    }

    /// The name given at creation.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether an automaton is currently bound to this surface.
    pub fn is_bound(&self) -> bool {
        self.inner.bound.get()
    }

    /// Whether two handles refer to the same surface.
    pub fn same_as(&self, other: &Surface) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn bind(&self) -> Result<Binding, Error> {
        if self.inner.bound.replace(true) {
            return Err(Error::SurfaceBound(self.inner.name.clone()));
        }
        Ok(Binding {
            surface: self.clone(),
        })
    }
}

/// Keeps a surface bound for as long as it lives.
#[derive(Debug)]
pub(crate) struct Binding {
    surface: Surface,
}

impl Binding {
    pub(crate) fn surface(&self) -> &Surface {
        &self.surface
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.surface.inner.bound.set(false);
    }
}
