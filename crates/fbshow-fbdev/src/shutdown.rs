/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use log::{info, warn};

/// Longest single sleep while waiting, bounds shutdown latency
const POLL_INTERVAL: Duration = Duration::from_millis(50);

static SIGNAL_TOKEN: OnceLock<ShutdownToken> = OnceLock::new();

/// A flag asking the display loop to stop.
///
/// Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>
}

impl ShutdownToken {
    pub fn new() -> ShutdownToken {
        ShutdownToken::default()
    }

    /// Request shutdown, safe to call from a signal handler
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Sleep for up to `timeout`, returning early with `true`
    /// once shutdown is requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        loop {
            if self.is_triggered() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}

extern "C" fn on_signal(_signal: libc::c_int) {
    if let Some(token) = SIGNAL_TOKEN.get() {
        token.trigger();
    }
}

/// Trigger `token` on SIGINT, SIGTERM and SIGHUP.
///
/// Handlers are process wide, only the first token installed is used.
pub fn install_signal_handlers(token: &ShutdownToken) -> std::io::Result<()> {
    if SIGNAL_TOKEN.set(token.clone()).is_err() {
        warn!("Signal handlers already installed, keeping the first token");
        return Ok(());
    }
    let handler = on_signal as extern "C" fn(libc::c_int);

    for signal in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
        // SAFETY: the handler only performs an atomic store
        let previous = unsafe { libc::signal(signal, handler as libc::sighandler_t) };

        if previous == libc::SIG_ERR {
            return Err(std::io::Error::last_os_error());
        }
    }
    info!("Installed shutdown signal handlers");
    Ok(())
}
