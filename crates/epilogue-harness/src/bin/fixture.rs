//! Scenario implementations for the conformance harness.
//!
//! Each scenario is one child-process lifetime: it registers handlers on
//! the process-wide registry, optionally manipulates them, and terminates
//! the way the scenario demands. Every observable event is a stdout line;
//! the runner compares the full sequence.

use std::process;

fn main() {
    let scenario = std::env::args().nth(1).unwrap_or_default();
    match scenario.as_str() {
        "exit_runs_handlers" => exit_runs_handlers(),
        "return_runs_handlers" => return_runs_handlers(),
        "exit_skips_drop" => exit_skips_drop(),
        "dedup_last_survivor" => dedup_last_survivor(),
        "unregister_silences" => unregister_silences(),
        "eager_run_fires_once" => eager_run_fires_once(),
        "revival_fires_again" => revival_fires_again(),
        "rekey_moves_dedup_group" => rekey_moves_dedup_group(),
        "panic_isolated" => panic_isolated(),
        "ordered_sweep" => ordered_sweep(),
        "unregister_all_silences" => unregister_all_silences(),
        "stale_handle_reports_false" => stale_handle_reports_false(),
        other => {
            eprintln!("unknown scenario: `{other}`");
            process::exit(2);
        }
    }
}

fn exit_runs_handlers() -> ! {
    epilogue_core::register(|| println!("handler first")).expect("register");
    epilogue_core::register(|| println!("handler second")).expect("register");
    println!("registered");
    process::exit(0);
}

fn return_runs_handlers() {
    epilogue_core::register(|| println!("handler only")).expect("register");
    // Fall off the end of main: the hook still fires.
}

struct DropGuard;

impl Drop for DropGuard {
    fn drop(&mut self) {
        println!("drop guard");
    }
}

fn exit_skips_drop() -> ! {
    let _guard = DropGuard;
    epilogue_core::register(|| println!("handler ran")).expect("register");
    // `exit` never unwinds the stack, so `_guard` must stay silent.
    process::exit(0);
}

fn dedup_last_survivor() -> ! {
    let h1 = epilogue_core::register_keyed("lock", || println!("handler one")).expect("register");
    let _h2 = epilogue_core::register_keyed("lock", || println!("handler two")).expect("register");
    println!("eager run: {}", epilogue_core::run(h1));
    process::exit(0);
}

fn unregister_silences() -> ! {
    let h = epilogue_core::register(|| println!("handler silenced")).expect("register");
    println!("cancelled: {}", epilogue_core::unregister(h));
    process::exit(0);
}

fn eager_run_fires_once() -> ! {
    let h = epilogue_core::register(|| println!("handler once")).expect("register");
    epilogue_core::run(h);
    println!("exiting");
    process::exit(0);
}

fn revival_fires_again() -> ! {
    let h = epilogue_core::register(|| println!("handler phoenix")).expect("register");
    epilogue_core::unregister(h);
    epilogue_core::re_register(h, None);
    process::exit(0);
}

fn rekey_moves_dedup_group() -> ! {
    let h1 = epilogue_core::register_keyed("a", || println!("handler one")).expect("register");
    let h2 = epilogue_core::register_keyed("b", || println!("handler two")).expect("register");
    epilogue_core::re_register(h2, Some("a"));
    // With both handlers now in group "a", running h1 is suppressed.
    println!("eager run: {}", epilogue_core::run(h1));
    process::exit(0);
}

fn panic_isolated() -> ! {
    epilogue_core::register(|| panic!("handler exploded")).expect("register");
    epilogue_core::register(|| println!("handler survivor")).expect("register");
    process::exit(0);
}

fn ordered_sweep() -> ! {
    for label in ["one", "two", "three", "four", "five"] {
        epilogue_core::register(move || println!("handler {label}")).expect("register");
    }
    process::exit(0);
}

fn unregister_all_silences() -> ! {
    for _ in 0..3 {
        epilogue_core::register(|| println!("handler noise")).expect("register");
    }
    epilogue_core::unregister_all();
    println!("remaining: {}", epilogue_core::handles().len());
    process::exit(0);
}

fn stale_handle_reports_false() -> ! {
    let h = epilogue_core::register(|| println!("handler once")).expect("register");
    println!("first run: {}", epilogue_core::run(h));
    println!("second run: {}", epilogue_core::run(h));
    println!("unregister: {}", epilogue_core::unregister(h));
    process::exit(0);
}
