use clap::{Args, Subcommand};

mod create;
mod list;
mod owned;
mod purchase;
mod purchases;
mod redeem;

#[derive(Debug, Args)]
pub(crate) struct VoucherCommand {
    #[command(subcommand)]
    command: VoucherSubcommand,
}

#[derive(Debug, Subcommand)]
enum VoucherSubcommand {
    /// Issue a voucher for a listing
    Create(create::CreateVoucherArgs),

    /// Buy a voucher on behalf of a user
    Purchase(purchase::PurchaseVoucherArgs),

    /// Redeem a purchase by its redemption token
    Redeem(redeem::RedeemVoucherArgs),

    /// List a buyer's purchased vouchers
    List(list::ListVouchersArgs),

    /// List vouchers issued by a listing owner
    Owned(owned::OwnedVouchersArgs),

    /// List a buyer's raw purchase records
    Purchases(purchases::BuyerPurchasesArgs),
}

pub(crate) async fn run(command: VoucherCommand) -> Result<(), String> {
    match command.command {
        VoucherSubcommand::Create(args) => create::run(args).await,
        VoucherSubcommand::Purchase(args) => purchase::run(args).await,
        VoucherSubcommand::Redeem(args) => redeem::run(args).await,
        VoucherSubcommand::List(args) => list::run(args).await,
        VoucherSubcommand::Owned(args) => owned::run(args).await,
        VoucherSubcommand::Purchases(args) => purchases::run(args).await,
    }
}
