//! Allocation tracing, compiled out entirely unless the `logging` feature is
//! enabled. Records are emitted under the `fixvec` target.
#![allow(unused_macros)]

// Without the feature the invocation is removed, arguments included.
macro_rules! emit {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "logging")]
        log::$level!(target: "fixvec", $($arg)+);
    };
}

macro_rules! debug {
    ($($arg:tt)+) => {
        emit!(debug, $($arg)+)
    };
}

macro_rules! trace {
    ($($arg:tt)+) => {
        emit!(trace, $($arg)+)
    };
}

// Run with `cargo test --features logging`.
#[cfg(all(test, feature = "logging"))]
mod tests {
    use crate::memory::{allocate_unaligned, free_unaligned};

    use core::sync::atomic::{AtomicUsize, Ordering};
    use log::{Level, LevelFilter, Log, Metadata, Record};

    struct Tally {
        acquired: AtomicUsize,
        released: AtomicUsize,
    }

    impl Log for Tally {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.target() == "fixvec" && metadata.level() == Level::Trace
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }

            let message = std::format!("{}", record.args());
            if message.starts_with("acquired") {
                self.acquired.fetch_add(1, Ordering::SeqCst);
            } else if message.starts_with("releasing") {
                self.released.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn flush(&self) {}
    }

    static TALLY: Tally = Tally {
        acquired: AtomicUsize::new(0),
        released: AtomicUsize::new(0),
    };

    #[test]
    fn block_lifetimes_are_traced() {
        log::set_logger(&TALLY).unwrap();
        log::set_max_level(LevelFilter::Trace);

        // Other tests may allocate concurrently, so only growth is checked.
        let acquired = TALLY.acquired.load(Ordering::SeqCst);
        let released = TALLY.released.load(Ordering::SeqCst);

        let ptr = allocate_unaligned::<u64>(4).unwrap();
        assert!(TALLY.acquired.load(Ordering::SeqCst) > acquired);

        unsafe { free_unaligned(ptr, 4) };
        assert!(TALLY.released.load(Ordering::SeqCst) > released);
    }
}
