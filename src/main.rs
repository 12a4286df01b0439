use async_overhead_benchmark::utils::helpers::init_logging;
use async_overhead_benchmark::{run_benchmark, BenchmarkConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    // The fixed defaults always validate, so this only trips on a broken build
    if let Err(e) = run_benchmark(BenchmarkConfig::default()).await {
        log::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}
