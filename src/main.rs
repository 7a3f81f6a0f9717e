use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::FmtSubscriber;
use wp_auslegung::cockpit::{run_cockpit, CockpitConfig};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct CockpitArgs {
    /// Address to bind the cockpit to.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    listen: IpAddr,
    #[arg(long, short, default_value_t = 8088)]
    port: u16,
    /// TTF file embedded into generated PDF reports. Builtin Helvetica is
    /// used when omitted.
    #[arg(long)]
    report_font: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CockpitArgs::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run_cockpit(
        SocketAddr::from((args.listen, args.port)),
        CockpitConfig {
            report_font: args.report_font,
        },
    )
    .await
}
