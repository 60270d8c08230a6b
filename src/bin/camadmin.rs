//! The `camadmin` console client.

use std::{env, process};
use log::debug;
use camadmin::cli::options::Options;
use camadmin::cli::report::Report;
use camadmin::config::Config;
use camadmin::constants::CAMADMIN_CLI_API_ENV;

fn main() {
    let options = Options::from_args();
    let format = options.general.format;

    let config = match Config::create(options.general.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            process::exit(Report::error(err).report(format))
        }
    };
    if let Err(err) = config.init_logging() {
        process::exit(Report::error(err).report(format))
    }

    if options.general.api {
        // SAFETY: No other threads exist yet, the runtime is started below.
        unsafe { env::set_var(CAMADMIN_CLI_API_ENV, "1") }
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            process::exit(
                Report::error(format!("cannot start runtime: {}", err))
                    .report(format)
            )
        }
    };

    debug!("Running command");
    let report = runtime.block_on(
        options.command.run(&config, options.general.api_uri)
    );
    process::exit(report.report(format))
}
