mod commands;
mod terminal;

use commands::discover::DiscoverArgs;
use commands::scan::ScanArgs;
use commands::{CommandLine, Commands, discover, interfaces, scan, serve};
use netsweep_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let cfg = Config {
        no_dns: commands.no_dns,
        quiet: commands.quiet,
    };

    match commands.command {
        Commands::Interfaces => {
            print::header("local interfaces", cfg.quiet);
            interfaces::interfaces(&cfg)
        }
        Commands::Discover {
            interface_ip,
            range,
            include_down,
            timeout_ms,
        } => {
            print::header("getting ready for discovery", cfg.quiet);
            let args = DiscoverArgs {
                interface_ip,
                range,
                include_down,
                timeout_ms,
            };
            discover::discover(args, &cfg).await
        }
        Commands::Scan {
            ip,
            ports,
            timeout_ms,
        } => {
            print::header("starting scanner", cfg.quiet);
            scan::scan(ScanArgs { ip, ports, timeout_ms }, &cfg).await
        }
        Commands::Serve { bind } => {
            print::header("starting api server", cfg.quiet);
            serve::serve(bind, &cfg).await
        }
    }
}
