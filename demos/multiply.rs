//! Port of the classic thread-pool demo: 3 workers multiplying numbers
//! with randomized simulated work.
//!
//! Run with `cargo run --example multiply`.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use log::info;
use rand::Rng;

use taskpool::ThreadPool;

fn simulate_hard_computation() {
    let millis = rand::thread_rng().gen_range(1000..3000);
    thread::sleep(Duration::from_millis(millis));
}

fn multiply(a: i32, b: i32) -> i32 {
    simulate_hard_computation();
    let res = a * b;
    info!("{} * {} = {}", a, b, res);
    res
}

fn main() -> taskpool::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut pool = ThreadPool::new(3)?;
    pool.start()?;

    // 30 fire-and-forget multiplications.
    for i in 1..=3 {
        for j in 1..=10 {
            pool.submit(move || {
                multiply(i, j);
            })?;
        }
    }

    // A task writing through a jointly-owned output cell instead of a
    // borrowed local. `get` returning makes the write visible here.
    let output = Arc::new(Mutex::new(0));
    let cell = Arc::clone(&output);
    let handle = pool.submit(move || {
        *cell.lock().unwrap() = multiply(5, 6);
    })?;
    handle.get().expect("task panicked");
    info!(
        "Last operation result is equal to {}",
        *output.lock().unwrap()
    );

    // A task returning its result through the handle.
    let handle = pool.submit(|| multiply(5, 6))?;
    let res = handle.get().expect("task panicked");
    info!("Last operation result is equal to {}", res);

    pool.shutdown();
    Ok(())
}
