//! A stand-in rendering boundary: binds to a counter and redraws on every
//! transition, with trace logging enabled so the diagnostic events show.

use tally::{Counter, Transition};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .init();

    let counter = Counter::new(7);
    let binding = counter.bind(|view| {
        println!("[{}]  {}", view.value, view.info_sentence());
    });

    let dispatch = counter.dispatcher();
    for transition in [
        Transition::Increment,
        Transition::Increment,
        Transition::Increment,
        Transition::Decrement,
    ] {
        dispatch(transition);
    }

    counter.unbind(binding);
}
