use stratcmp_cli::{command, init_tracing, load_config, run};

fn main() -> anyhow::Result<()> {
    let matches = command().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config.log_level);

    let stdout = std::io::stdout();
    run(&matches, config, &mut stdout.lock())
}
