use clap::Args;
use vouchers_app::domain::{users::UserId, vouchers::records::VoucherUuid};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct PurchaseVoucherArgs {
    #[arg(long)]
    voucher_id: VoucherUuid,

    #[arg(long)]
    buyer_id: i64,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: PurchaseVoucherArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let purchase = context
        .vouchers
        .purchase_voucher(args.voucher_id, UserId::new(args.buyer_id))
        .await
        .map_err(|error| format!("failed to purchase voucher: {error}"))?;

    println!("purchase_id: {}", purchase.uuid);
    println!("redemption_token: {}", purchase.redemption_token.as_str());
    println!("store this token now; it is the only way to redeem the voucher");

    Ok(())
}
