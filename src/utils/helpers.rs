//! Process-level helpers

use std::io::Write;

use env_logger::Env;

/// Route `log` records to stderr as bare messages
///
/// Default level is `warn` so a normal run only shows mechanism errors and
/// timeouts; `RUST_LOG=info` or `debug` adds run details.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init();
}
