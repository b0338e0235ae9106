mod cli;
mod run;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let a = run::build_matrix(&cli)?;
    let backend = run::make_backend(cli.algo, cli.threads)?;
    tracing::info!(
        format = %a.format(),
        algo = backend.name(),
        shape = %a.shape(),
        nnz = a.nnz(),
        repeat = cli.repeat,
        "starting spmv"
    );

    let report = run::run(&a, backend.as_ref(), cli.repeat)?;

    println!("A : {} x {}, {} non-zeros", report.nrows, report.ncols, report.nnz);
    println!("format : {}", report.format);
    println!("algo : {}", report.backend);
    println!(
        "{} iterations in {:.6} sec = {:.3} GFLOPS",
        report.repeat,
        report.elapsed.as_secs_f64(),
        report.gflops_per_sec()
    );
    println!("|y| = {:.15e}", report.norm);
    Ok(())
}
