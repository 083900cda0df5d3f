use clap::Args;
use vouchers_app::domain::users::UserId;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct OwnedVouchersArgs {
    #[arg(long)]
    user_id: i64,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: OwnedVouchersArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let vouchers = context
        .vouchers
        .list_listing_owner_vouchers(UserId::new(args.user_id))
        .await
        .map_err(|error| format!("failed to list vouchers: {error}"))?;

    for voucher in vouchers {
        println!(
            "{}\t{}\t{}\t{}",
            voucher.uuid, voucher.listing_id, voucher.price, voucher.title
        );
    }

    Ok(())
}
