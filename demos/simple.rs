use tally::Counter;

fn main() {
    let counter = Counter::new(7);
    dbg!(counter.view());

    counter.increment();
    counter.increment();
    counter.increment();
    counter.decrement();
    dbg!(counter.view());

    println!("{}", counter.view().info_sentence());
}
