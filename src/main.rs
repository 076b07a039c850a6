use ::log::*;
use factinstall::{config::Builder, log, opts::Opts, Provisioner};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::get();
    let config = Builder::new()
        .apply_config_file(&opts.config)?
        .apply_env()?
        .apply_opts(&opts)
        .build();

    log::setup_logging(&config)?;
    config.debug_values();

    let provisioner = Provisioner::new(config)?;
    match provisioner.run(&opts.params).await {
        Ok(provisioned) => {
            println!(
                "Server ready to be launched! use the following command to launch:\n\n{}",
                provisioned.launch_command
            );
            Ok(())
        }
        Err(e) => {
            error!("{}: {:#}", e, e.source);
            std::process::exit(1);
        }
    }
}
