use clap::Args;
use rust_decimal::Decimal;
use vouchers_app::domain::{
    users::{ListingId, UserId},
    vouchers::data::VoucherDraft,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateVoucherArgs {
    /// Listing (advert) the voucher belongs to
    #[arg(long)]
    listing_id: i64,

    /// Owner of the listing
    #[arg(long)]
    user_id: i64,

    #[arg(long)]
    title: String,

    #[arg(long)]
    description: Option<String>,

    /// Exact decimal price, e.g. 5.00
    #[arg(long)]
    price: Decimal,

    #[arg(long)]
    photo_url: Option<String>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateVoucherArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let voucher = context
        .vouchers
        .create_voucher(VoucherDraft {
            listing_id: ListingId::new(args.listing_id),
            user_id: UserId::new(args.user_id),
            title: args.title,
            description: args.description,
            price: args.price,
            photo_url: args.photo_url,
        })
        .await
        .map_err(|error| format!("failed to create voucher: {error}"))?;

    println!("voucher_id: {}", voucher.uuid);
    println!("title: {}", voucher.title);
    println!("price: {}", voucher.price);

    Ok(())
}
