//! The rendering hook.

use crate::{cells::Coord, states::State};
use educe::Educe;

/// Something that displays cells.
///
/// The automaton calls [`render`](Renderer::render) once per cell when it is
/// created, after every [`set_state`](crate::Automaton::set_state), and
/// after every [`step`](crate::Automaton::step).
pub trait Renderer {
    /// Displays the cell at `coord`, whose state is `state`
    /// (`None` if it has none).
    fn render(&mut self, coord: Coord, state: Option<&State>);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, coord: Coord, state: Option<&State>) {
        (**self).render(coord, state)
    }
}

/// A renderer that does nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoRender;

impl Renderer for NoRender {
    #[inline]
    fn render(&mut self, _: Coord, _: Option<&State>) {}
}

/// A renderer defined by a closure. See [`from_fn`].
#[derive(Educe)]
#[educe(Debug)]
pub struct FnRenderer<F> {
    #[educe(Debug(ignore))]
    f: F,
}

/// Turns a closure into a [`Renderer`].
pub fn from_fn<F>(f: F) -> FnRenderer<F>
where
    F: FnMut(Coord, Option<&State>),
{
    FnRenderer { f }
}

impl<F> Renderer for FnRenderer<F>
where
    F: FnMut(Coord, Option<&State>),
{
    fn render(&mut self, coord: Coord, state: Option<&State>) {
        (self.f)(coord, state)
    }
}
