use clap::Args;
use vouchers_app::domain::users::UserId;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListVouchersArgs {
    #[arg(long)]
    buyer_id: i64,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListVouchersArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let purchases = context
        .vouchers
        .list_user_vouchers(UserId::new(args.buyer_id))
        .await
        .map_err(|error| format!("failed to list vouchers: {error}"))?;

    for purchase in purchases {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            purchase.purchase_uuid,
            purchase.status,
            purchase.purchased_at,
            purchase.title,
            purchase
                .redemption_token
                .as_ref()
                .map_or("-", |token| token.as_str()),
        );
    }

    Ok(())
}
