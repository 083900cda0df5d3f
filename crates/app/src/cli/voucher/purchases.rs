use clap::Args;
use vouchers_app::domain::users::UserId;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct BuyerPurchasesArgs {
    #[arg(long)]
    buyer_id: i64,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: BuyerPurchasesArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let purchases = context
        .vouchers
        .list_buyer_purchases(UserId::new(args.buyer_id))
        .await
        .map_err(|error| format!("failed to list purchases: {error}"))?;

    for purchase in purchases {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            purchase.uuid,
            purchase.voucher_uuid,
            purchase.status,
            purchase.created_at,
            purchase
                .redeemed_at
                .map_or_else(|| "-".to_string(), |at| at.to_string()),
        );
    }

    Ok(())
}
