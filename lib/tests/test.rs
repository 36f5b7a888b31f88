use cagrid_lib::{
    render, rules, Automaton, Cell, ErrorKind, InitialState, Options, State, StateLike, Surface,
    Value,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{cell::RefCell, error::Error, rc::Rc};

/// States with values `1..=n`, labelled with the same number.
fn numbered(n: u32) -> Vec<State> {
    (1..=n).map(|i| State::new(i, i.to_string()).unwrap()).collect()
}

fn value(state: Option<&State>) -> Option<f64> {
    match state.map(State::value) {
        Some(&Value::Number(n)) => Some(n),
        _ => None,
    }
}

fn increment() -> impl rules::Rule {
    rules::from_fn(|state: Option<&State>, _| value(state).map_or(0.0, |n| n + 1.0))
}

#[test]
fn state_equality() -> Result<(), Box<dyn Error>> {
    let state = State::new(42, "Answer")?;
    assert_eq!(state, State::new(42, "Answer")?);
    assert_ne!(state, State::new(43, "Answer")?);
    assert_ne!(state, State::new(42, "answer")?);
    assert_ne!(State::new(1, "One")?, State::new("1", "One")?);
    assert_ne!(State::new(true, "One")?, State::new(1, "One")?);
    assert!(state.equals(Some(&state.clone())));
    assert!(!state.equals(None));
    assert_eq!(state.to_string(), "Answer (42)");
    assert_eq!(State::new(1.5, "x")?.to_string(), "x (1.5)");
    Ok(())
}

#[test]
fn state_clone() -> Result<(), Box<dyn Error>> {
    let state = State::new("R", "Red")?;
    let clone = state.clone();
    assert_eq!(clone, state);
    assert!(!std::ptr::eq(&clone, &state));
    Ok(())
}

#[test]
fn empty_label() {
    let err = State::new(true, "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn cell_lifecycle() -> Result<(), Box<dyn Error>> {
    let alive = State::new(true, "Alive")?;
    let mut cell = Cell::new(2, 3, None);
    assert_eq!(cell.coordinates(), (2, 3));
    assert_eq!(cell.state(), None);
    assert!(!cell.has_next_state());

    let err = cell.advance().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalState);

    assert_eq!(cell.set_next_state(Some(alive.clone())), Some(&alive));
    assert!(cell.has_next_state());
    assert_eq!(cell.advance()?.state(), Some(&alive));
    assert!(!cell.has_next_state());
    assert_eq!(cell.next_state(), None);

    cell.set_next_state(Some(alive.clone()));
    assert_eq!(cell.set_next_state(None), None);
    assert!(cell.advance().is_err());
    assert_eq!((cell.x(), cell.y()), (2, 3));
    Ok(())
}

#[test]
fn construction_errors() -> Result<(), Box<dyn Error>> {
    let surface = Surface::new("errors");
    let err = Automaton::new(&surface, 0, 5, increment(), Options::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = Automaton::new(
        &surface,
        2,
        3,
        increment(),
        Options::default().initial_state(vec![vec![1, 2], vec![3, 4]]),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = Automaton::new(
        &surface,
        2,
        2,
        increment(),
        Options::default()
            .allowed_states(numbered(2))
            .initial_state(7),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = Automaton::new(
        &surface,
        2,
        2,
        increment(),
        Options::default().allowed_states(numbered(1)),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = Automaton::new(
        &surface,
        2,
        2,
        increment(),
        Options::default().auto_step_interval_ms(0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert!(!surface.is_bound());
    Ok(())
}

#[test]
fn duplicate_allowed_states() -> Result<(), Box<dyn Error>> {
    let surface = Surface::new("duplicates");
    let rendered = Rc::new(RefCell::new(0));
    let counter = rendered.clone();
    let err = Automaton::new(
        &surface,
        3,
        3,
        increment(),
        Options::default()
            .render_fn(move |_, _| *counter.borrow_mut() += 1)
            .allowed_states(vec![State::new(1, "One")?, State::new(1, "Uno")?]),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(*rendered.borrow(), 0);
    assert!(!surface.is_bound());
    Ok(())
}

#[test]
fn surface_binding() -> Result<(), Box<dyn Error>> {
    let surface = Surface::new("main");
    let ca = Automaton::new(&surface, 2, 2, increment(), Options::default())?;
    assert!(surface.is_bound());
    assert!(ca.surface().same_as(&surface));

    let err = Automaton::new(&surface.clone(), 2, 2, increment(), Options::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalState);

    drop(ca);
    assert!(!surface.is_bound());
    let _ca = Automaton::new(&surface, 2, 2, increment(), Options::default())?;
    Ok(())
}

#[test]
fn construction_renders_every_cell() -> Result<(), Box<dyn Error>> {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let log = calls.clone();
    let ca = Automaton::new(
        &Surface::new("render"),
        2,
        3,
        increment(),
        Options::default()
            .render(render::from_fn(move |coord, state: Option<&State>| {
                log.borrow_mut().push((coord, state.cloned()))
            }))
            .initial_state(InitialState::generator(|x, y| (x * 10 + y) as u32)),
    )?;
    assert_eq!(ca.dimensions(), (3, 2));
    let calls = calls.borrow();
    assert_eq!(calls.len(), 6);
    assert!(calls.contains(&((2, 1), Some(State::new(21, "21")?))));
    Ok(())
}

#[test]
fn unset_cells() -> Result<(), Box<dyn Error>> {
    let ca = Automaton::new(&Surface::new("unset"), 2, 2, increment(), Options::default())?;
    for cell in ca.cells() {
        assert_eq!(cell.state(), None);
    }
    assert_eq!(ca.cell_neighbours(0, 0)?[2].map(Cell::coordinates), Some((1, 0)));
    assert_eq!(ca.cell_neighbour_states(0, 0)?, [None; 8]);
    Ok(())
}

#[test]
fn cell_access() -> Result<(), Box<dyn Error>> {
    let states = vec![vec![1, 2], vec![3, 4]];
    let ca = Automaton::new(
        &Surface::new("access"),
        2,
        2,
        increment(),
        Options::default()
            .initial_state(states)
            .allowed_states(numbered(4)),
    )?;
    assert_eq!(ca.cell(1, 0)?.coordinates(), (1, 0));
    assert_eq!(value(ca.cell_state(0, 1)?), Some(2.0));
    assert_eq!(ca.cell(2, 0).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(ca.cell_state(0, 2).unwrap_err().kind(), ErrorKind::Range);
    Ok(())
}

#[test]
fn allowed_state_lookup() -> Result<(), Box<dyn Error>> {
    let colours = vec![
        State::new("R", "Red")?,
        State::new("G", "Green")?,
        State::new("B", "Blue")?,
    ];
    let ca = Automaton::new(
        &Surface::new("colours"),
        4,
        2,
        rules::from_fn(|state: Option<&State>, _| state.cloned().unwrap()),
        Options::default()
            .initial_state(colours[0].clone())
            .allowed_states(colours.clone()),
    )?;
    assert_eq!(ca.allowed_states(), Some(&colours[..]));
    assert_eq!(ca.state_from_value(&"R".into()), Some(&colours[0]));
    assert_eq!(ca.state_from_value(&"boogers".into()), None);
    assert!(ca.has_state("R"));
    assert!(ca.has_state(&colours[1]));
    assert!(!ca.has_state("boogers"));
    assert!(!ca.has_state(State::new("boogers", "Boogers")?));
    assert!(ca.has_state(State::new("B", "Bleu")?));
    assert_eq!(ca.resolve("G")?, colours[1]);

    let free = Automaton::new(&Surface::new("free"), 1, 1, increment(), Options::default())?;
    assert_eq!(free.state_from_value(&"R".into()), None);
    assert!(!free.has_state("R"));
    assert_eq!(free.resolve(3)?, State::new(3, "3")?);
    Ok(())
}

#[test]
fn neighbour_rotation() -> Result<(), Box<dyn Error>> {
    // 1  2  3  4  5
    // 6  7  8  9 10
    // 11 12 13 14 15
    // 16 17 18 19 20
    let ca = Automaton::new(
        &Surface::new("neighbours"),
        4,
        5,
        increment(),
        Options::default()
            .initial_state(InitialState::generator(|x, y| (y * 5 + x + 1) as u32))
            .allowed_states(numbered(20)),
    )?;
    let values = |x, y| -> Result<Vec<Option<f64>>, Box<dyn Error>> {
        Ok(ca
            .cell_neighbour_states(x, y)?
            .iter()
            .map(|&s| value(s))
            .collect())
    };
    let n = |i: f64| Some(i);
    assert_eq!(
        values(3, 2)?,
        [n(9.), n(10.), n(15.), n(20.), n(19.), n(18.), n(13.), n(8.)]
    );
    assert_eq!(
        values(0, 0)?,
        [None, None, n(2.), n(7.), n(6.), None, None, None]
    );
    assert_eq!(
        values(4, 0)?,
        [None, None, None, None, n(10.), n(9.), n(4.), None]
    );
    assert_eq!(
        values(4, 3)?,
        [n(15.), None, None, None, None, None, n(19.), n(14.)]
    );
    assert_eq!(
        values(0, 3)?,
        [n(11.), n(12.), n(17.), None, None, None, None, None]
    );
    assert_eq!(ca.cell_neighbour_states(5, 0).unwrap_err().kind(), ErrorKind::Range);
    Ok(())
}

#[test]
fn step_increments() -> Result<(), Box<dyn Error>> {
    let states = numbered(26);
    // 1..=25, column by column.
    let initial = |x: usize, y: usize| (x * 5 + y + 1) as u32;
    let mut ca = Automaton::new(
        &Surface::new("step"),
        5,
        5,
        increment(),
        Options::default()
            .initial_state(InitialState::generator(initial))
            .allowed_states(states.clone()),
    )?;
    ca.step()?;
    assert_eq!(ca.generation(), 1);
    for x in 0..5 {
        for y in 0..5 {
            let expected = &states[initial(x, y) as usize];
            assert_eq!(ca.cell_state(x, y)?, Some(expected));
        }
    }
    Ok(())
}

#[test]
fn step_with_state_objects() -> Result<(), Box<dyn Error>> {
    let states = numbered(27);
    let next = states.clone();
    let mut ca = Automaton::new(
        &Surface::new("objects"),
        5,
        5,
        rules::from_fn(move |state: Option<&State>, _| {
            let i = value(state).unwrap_or(0.0) as usize;
            next[i].clone()
        }),
        Options::default()
            .initial_state(InitialState::generator(|x, y| (x * 5 + y + 1) as u32))
            .allowed_states(states.clone()),
    )?;
    ca.step()?.step()?;
    assert_eq!(ca.generation(), 2);
    assert_eq!(value(ca.cell_state(0, 0)?), Some(3.0));
    assert_eq!(value(ca.cell_state(4, 4)?), Some(27.0));
    Ok(())
}

#[test]
fn step_uses_previous_generation() -> Result<(), Box<dyn Error>> {
    // Every cell takes the value of its left neighbor, or 0 on the left edge.
    let mut ca = Automaton::new(
        &Surface::new("shift"),
        1,
        4,
        rules::from_fn(|_, nbhd| value(nbhd[6]).unwrap_or(0.0)),
        Options::default().initial_state(InitialState::generator(|x, _| x as u32 + 1)),
    )?;
    ca.step()?;
    let row: Vec<_> = (0..4).map(|x| value(ca.cell_state(x, 0).unwrap())).collect();
    assert_eq!(row, [Some(0.0), Some(1.0), Some(2.0), Some(3.0)]);
    Ok(())
}

#[test]
fn unresolvable_step_changes_nothing() -> Result<(), Box<dyn Error>> {
    let rendered = Rc::new(RefCell::new(0));
    let counter = rendered.clone();
    let mut ca = Automaton::new(
        &Surface::new("unresolvable"),
        3,
        3,
        increment(),
        Options::default()
            .render_fn(move |_, _| *counter.borrow_mut() += 1)
            .initial_state(1)
            .allowed_states(numbered(2)),
    )?;
    ca.step()?;
    assert_eq!(*rendered.borrow(), 18);
    let err = ca.step().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(ca.generation(), 1);
    assert_eq!(*rendered.borrow(), 18);
    assert!(ca.cells().all(|cell| value(cell.state()) == Some(2.0)));
    Ok(())
}

#[test]
fn manual_next_state_is_overwritten_by_step() -> Result<(), Box<dyn Error>> {
    let mut ca = Automaton::new(
        &Surface::new("manual"),
        1,
        1,
        increment(),
        Options::default().initial_state(1),
    )?;
    ca.set_cell_next_state(0, 0, 10)?;
    assert_eq!(value(ca.cell(0, 0)?.next_state()), Some(10.0));
    assert_eq!(value(ca.cell_state(0, 0)?), Some(1.0));
    ca.advance_cell(0, 0)?;
    assert_eq!(ca.cell_state(0, 0)?, Some(&State::new(10, "10")?));
    assert!(!ca.cell(0, 0)?.has_next_state());
    ca.step()?;
    assert_eq!(value(ca.cell_state(0, 0)?), Some(11.0));
    Ok(())
}

#[test]
fn manual_next_state_must_be_allowed() -> Result<(), Box<dyn Error>> {
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let log = rendered.clone();
    let states = vec![State::new(0, "a")?, State::new(1, "b")?];
    let mut ca = Automaton::new(
        &Surface::new("allowed"),
        1,
        2,
        increment(),
        Options::default()
            .render_fn(move |coord, state: Option<&State>| {
                log.borrow_mut().push((coord, state.cloned()))
            })
            .initial_state(0)
            .allowed_states(states.clone()),
    )?;
    rendered.borrow_mut().clear();

    let err = ca.set_cell_next_state(0, 0, 99).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = ca
        .set_cell_next_state(0, 0, State::new(99, "rogue")?)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(!ca.cell(0, 0)?.has_next_state());
    let err = ca.advance_cell(0, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalState);
    assert_eq!(ca.cell_state(0, 0)?, Some(&states[0]));
    assert!(rendered.borrow().is_empty());

    ca.set_cell_next_state(1, 0, State::new(1, "renamed")?)?
        .advance_cell(1, 0)?;
    assert_eq!(ca.cell_state(1, 0)?, Some(&states[1]));
    assert_eq!(*rendered.borrow(), [((1, 0), Some(states[1].clone()))]);

    let err = ca.set_cell_next_state(2, 0, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    Ok(())
}

#[test]
fn rule_and_renderer_access() -> Result<(), Box<dyn Error>> {
    let rendered = Rc::new(RefCell::new(0));
    let counter = rendered.clone();
    let mut ca = Automaton::new(
        &Surface::new("access"),
        1,
        1,
        increment(),
        Options::default()
            .render_fn(move |_, _| *counter.borrow_mut() += 1)
            .initial_state(4),
    )?;
    let four = State::new(4, "4")?;
    let next = ca.rule_mut().step(Some(&four), &[None; 8]);
    assert_eq!(next.value(), &Value::Number(5.0));
    ca.renderer_mut().render((0, 0), None);
    assert_eq!(*rendered.borrow(), 2);
    assert_eq!(ca.generation(), 0);
    Ok(())
}

#[test]
fn oversized_grid() -> Result<(), Box<dyn Error>> {
    let surface = Surface::new("huge");
    for (rows, cols) in [(usize::MAX, 2), (2, usize::MAX), (usize::MAX / 2, 1)] {
        let err = Automaton::new(&surface, rows, cols, increment(), Options::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    assert!(!surface.is_bound());
    Ok(())
}

#[test]
fn random_soup() -> Result<(), Box<dyn Error>> {
    let states = vec![
        State::new(0, "Dead")?,
        State::new(1, "Alive")?,
        State::new(2, "Dying")?,
    ];
    let soup = |initial_state: InitialState| {
        Automaton::new(
            &Surface::new("soup"),
            10,
            10,
            increment(),
            Options::default()
                .initial_state(initial_state)
                .allowed_states(states.clone()),
        )
    };

    let full = soup(InitialState::random_with_rng(
        states.clone(),
        1.0,
        StdRng::seed_from_u64(42),
    ))?;
    assert!(full.cells().all(|cell| cell.state() != Some(&states[0])));
    assert!(full.cells().any(|cell| cell.state() == Some(&states[1])));
    assert!(full.cells().any(|cell| cell.state() == Some(&states[2])));

    let empty = soup(InitialState::random_with_rng(
        states.clone(),
        f64::NAN,
        StdRng::seed_from_u64(42),
    ))?;
    assert!(empty.cells().all(|cell| cell.state() == Some(&states[0])));

    let clamped = soup(InitialState::random(states.clone(), -3.0))?;
    assert!(clamped.cells().all(|cell| cell.state() == Some(&states[0])));

    assert!(matches!(
        InitialState::random(vec![states[2].clone()], 0.9),
        InitialState::Uniform(StateLike::State(ref s)) if s == &states[2]
    ));
    assert!(matches!(
        InitialState::random(Vec::new(), 0.9),
        InitialState::Empty
    ));
    Ok(())
}

#[test]
fn generation_counting() -> Result<(), Box<dyn Error>> {
    let alive = State::new(true, "Alive")?;
    let dead = State::new(false, "Dead")?;
    let mut ca = Automaton::new(
        &Surface::new("generations"),
        3,
        3,
        rules::from_fn(|state: Option<&State>, _| state.cloned().unwrap()),
        Options::default().initial_state(alive.clone()),
    )?;
    assert_eq!(ca.generation(), 0);
    ca.step()?.step()?.step()?;
    assert_eq!(ca.generation(), 3);
    ca.set_state(dead.clone())?;
    assert_eq!(ca.generation(), 0);
    assert!(ca.cells().all(|cell| cell.state() == Some(&dead)));
    Ok(())
}

#[test]
fn set_state() -> Result<(), Box<dyn Error>> {
    let rendered = Rc::new(RefCell::new(0));
    let counter = rendered.clone();
    let mut ca = Automaton::new(
        &Surface::new("set"),
        3,
        3,
        increment(),
        Options::default()
            .render_fn(move |_, _| *counter.borrow_mut() += 1)
            .initial_state(true),
    )?;
    assert_eq!(*rendered.borrow(), 9);

    ca.set_state(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])?;
    assert_eq!(*rendered.borrow(), 18);
    assert_eq!(value(ca.cell_state(1, 2)?), Some(6.0));

    ca.set_state(InitialState::generator(|x, y| format!("{}, {}", x, y)))?;
    assert_eq!(
        ca.cell_state(2, 1)?.map(State::value),
        Some(&Value::from("2, 1"))
    );

    let before: Vec<_> = ca.cells().cloned().collect();
    assert!(ca.set_state(vec![vec![1, 2], vec![3, 4]]).is_err());
    assert!(ca.set_state(InitialState::Empty).is_err());
    assert!(ca.set_state("").is_err());
    let after: Vec<_> = ca.cells().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(*rendered.borrow(), 27);
    Ok(())
}

#[test]
fn generation_change_listeners() -> Result<(), Box<dyn Error>> {
    let mut ca = Automaton::new(
        &Surface::new("listeners"),
        3,
        3,
        rules::from_fn(|state: Option<&State>, _| state.cloned().unwrap()),
        Options::default().initial_state(State::new(true, "Alive")?),
    )?;
    ca.generation_change();

    let calls = Rc::new(RefCell::new(Vec::new()));
    let first = calls.clone();
    let second = calls.clone();
    ca.on_generation_change(move |g| first.borrow_mut().push(("first", g)))
        .on_generation_change(move |g| second.borrow_mut().push(("second", g)));

    ca.generation_change();
    assert_eq!(*calls.borrow(), [("first", 0), ("second", 0)]);

    calls.borrow_mut().clear();
    ca.step()?;
    assert_eq!(*calls.borrow(), [("first", 1), ("second", 1)]);

    calls.borrow_mut().clear();
    ca.set_state(StateLike::from(State::new(true, "Alive")?))?;
    assert_eq!(*calls.borrow(), [("first", 0), ("second", 0)]);
    Ok(())
}
