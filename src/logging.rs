use cfg_if::cfg_if;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Route tracing events to the browser console.
        ///
        /// Safe to call more than once; only the first call installs anything.
        pub fn init() {
            let wasm_layer = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());

            let _ = tracing_subscriber::registry()
                .with(env_filter())
                .with(wasm_layer)
                .try_init();

            #[cfg(feature = "console_error_panic_hook")]
            console_error_panic_hook::set_once();
        }
    } else {
        use std::ffi::OsStr;
        use std::path::Path;
        use std::{env, io};

        use once_cell::sync::OnceCell;
        use tracing_appender::non_blocking::WorkerGuard;
        use tracing_subscriber::fmt;

        static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

        /// Log file used when neither `FPS_RIG_LOG_FILE` nor `RUST_LOG_FILE` is set
        const DEFAULT_LOG_FILE: &str = "logs/fps-rig.log";

        /// Install the global subscriber: compact stderr output plus a
        /// daily-rolling log file.
        ///
        /// The file comes from `FPS_RIG_LOG_FILE`, then `RUST_LOG_FILE`, then
        /// `logs/fps-rig.log`; the value `off` disables it. Safe to call more
        /// than once; only the first call installs anything.
        pub fn init() {
            let console_layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .compact();

            let log_path = env::var("FPS_RIG_LOG_FILE")
                .or_else(|_| env::var("RUST_LOG_FILE"))
                .unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

            let file_layer = (log_path != "off").then(|| {
                let path = Path::new(&log_path);
                let (nb_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
                    path.parent().unwrap_or(Path::new(".")),
                    path.file_name().unwrap_or(OsStr::new("fps-rig.log")),
                ));
                let _ = FILE_GUARD.set(guard);

                fmt::layer()
                    .with_writer(nb_writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_level(true)
                    .compact()
            });

            let installed = tracing_subscriber::registry()
                .with(env_filter())
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .is_ok();

            if installed {
                install_panic_hook();
            }
        }

        /// Log panics with a backtrace instead of printing them raw
        fn install_panic_hook() {
            std::panic::set_hook(Box::new(|info| {
                let mut msg = String::new();
                if let Some(loc) = info.location() {
                    msg.push_str(&format!("panic at {}:{}:{} ", loc.file(), loc.line(), loc.column()));
                }
                let payload = info.payload();
                let reason = if let Some(s) = payload.downcast_ref::<&str>() {
                    *s
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.as_str()
                } else {
                    "<non-string panic>"
                };
                msg.push_str(reason);
                let backtrace = std::backtrace::Backtrace::force_capture();
                tracing::error!(panic = %msg, "fps-rig panicked\n{backtrace}");
            }));
        }
    }
}
