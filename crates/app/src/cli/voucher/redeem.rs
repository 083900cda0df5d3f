use clap::Args;
use jiff::Timestamp;
use vouchers_app::tokens::RedemptionToken;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RedeemVoucherArgs {
    #[arg(long, env = "REDEMPTION_TOKEN", hide_env_values = true)]
    token: RedemptionToken,

    /// Redemption time (RFC 3339); defaults to now
    #[arg(long)]
    redeemed_at: Option<Timestamp>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: RedeemVoucherArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    context
        .vouchers
        .redeem_voucher(args.token, args.redeemed_at.unwrap_or_else(Timestamp::now))
        .await
        .map_err(|error| format!("failed to redeem voucher: {error}"))?;

    println!("voucher redeemed");

    Ok(())
}
