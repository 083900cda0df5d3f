//! Voucher lifecycle service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        lifecycle::{errors::VouchersServiceError, views::PurchaseView},
        purchases::{
            PgPurchaseStore, PurchaseStore,
            data::NewPurchase,
            records::{PurchaseRecord, PurchaseUuid},
        },
        store::{StoreError, UniqueKey},
        users::UserId,
        vouchers::{
            PgVoucherStore, VoucherStore,
            data::VoucherDraft,
            records::{VoucherRecord, VoucherUuid},
        },
    },
    tokens::{OsRngTokenGenerator, RedemptionToken, TokenGenerator},
};

/// Enforces the voucher lifecycle across the voucher and purchase stores:
/// a voucher is purchased at most once and its purchase redeemed at most once.
#[derive(Clone)]
pub struct VoucherLifecycle {
    vouchers: Arc<dyn VoucherStore>,
    purchases: Arc<dyn PurchaseStore>,
    tokens: Arc<dyn TokenGenerator>,
}

impl VoucherLifecycle {
    #[must_use]
    pub fn new(
        vouchers: Arc<dyn VoucherStore>,
        purchases: Arc<dyn PurchaseStore>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            vouchers,
            purchases,
            tokens,
        }
    }

    /// Lifecycle backed by the `PostgreSQL` stores and OS randomness.
    #[must_use]
    pub fn postgres(db: Db) -> Self {
        Self::new(
            Arc::new(PgVoucherStore::new(db.clone())),
            Arc::new(PgPurchaseStore::new(db)),
            Arc::new(OsRngTokenGenerator::new()),
        )
    }
}

fn validate_draft(draft: &VoucherDraft) -> Result<(), VouchersServiceError> {
    if !draft.listing_id.is_valid() {
        return Err(VouchersServiceError::invalid("adv_id", "must be positive"));
    }

    if !draft.user_id.is_valid() {
        return Err(VouchersServiceError::invalid("user_id", "must be positive"));
    }

    if draft.title.trim().is_empty() {
        return Err(VouchersServiceError::invalid("title", "must not be empty"));
    }

    if draft.price < Decimal::ZERO {
        return Err(VouchersServiceError::invalid("price", "must not be negative"));
    }

    Ok(())
}

fn validate_user(field: &'static str, user: UserId) -> Result<(), VouchersServiceError> {
    if user.is_valid() {
        Ok(())
    } else {
        Err(VouchersServiceError::invalid(field, "must be positive"))
    }
}

#[async_trait]
impl VouchersService for VoucherLifecycle {
    #[tracing::instrument(
        name = "vouchers.service.create_voucher",
        skip(self, draft),
        fields(
            listing_id = %draft.listing_id,
            user_id = %draft.user_id,
            voucher_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn create_voucher(
        &self,
        draft: VoucherDraft,
    ) -> Result<VoucherRecord, VouchersServiceError> {
        validate_draft(&draft)?;

        let uuid = VoucherUuid::from_uuid(self.tokens.identifier());

        Span::current().record("voucher_uuid", tracing::field::display(uuid));

        let voucher = self
            .vouchers
            .create_voucher(draft.into_new_voucher(uuid))
            .await?;

        info!("voucher created");

        Ok(voucher)
    }

    #[tracing::instrument(
        name = "vouchers.service.purchase_voucher",
        skip(self),
        fields(
            voucher_uuid = %voucher,
            buyer_id = %buyer,
            purchase_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn purchase_voucher(
        &self,
        voucher: VoucherUuid,
        buyer: UserId,
    ) -> Result<PurchaseRecord, VouchersServiceError> {
        if voucher.is_nil() {
            return Err(VouchersServiceError::invalid("voucher_id", "must not be nil"));
        }

        validate_user("buyer_id", buyer)?;

        if self.vouchers.get_voucher(voucher).await?.is_none() {
            return Err(VouchersServiceError::VoucherNotFound);
        }

        if self
            .purchases
            .get_purchase_by_voucher(voucher)
            .await?
            .is_some()
        {
            return Err(VouchersServiceError::AlreadyPurchased);
        }

        let uuid = PurchaseUuid::from_uuid(self.tokens.identifier());

        Span::current().record("purchase_uuid", tracing::field::display(uuid));

        let purchase = NewPurchase {
            uuid,
            voucher_uuid: voucher,
            buyer_id: buyer,
            redemption_token: self.tokens.redemption_token(),
        };

        // The existence check above can race with a concurrent purchase; the
        // unique voucher constraint decides the winner.
        match self.purchases.create_purchase(purchase).await {
            Ok(created) => {
                info!("voucher purchased");

                Ok(created)
            }
            Err(StoreError::Duplicate(UniqueKey::PurchaseVoucher)) => {
                Err(VouchersServiceError::AlreadyPurchased)
            }
            Err(StoreError::MissingReference) => Err(VouchersServiceError::VoucherNotFound),
            Err(error) => Err(error.into()),
        }
    }

    #[tracing::instrument(
        name = "vouchers.service.redeem_voucher",
        skip(self, token),
        fields(purchase_uuid = tracing::field::Empty, redeemed_at = %redeemed_at),
        err
    )]
    async fn redeem_voucher(
        &self,
        token: RedemptionToken,
        redeemed_at: Timestamp,
    ) -> Result<(), VouchersServiceError> {
        if token.is_blank() {
            return Err(VouchersServiceError::invalid(
                "redemption_token",
                "must not be empty",
            ));
        }

        let purchase = self
            .purchases
            .get_purchase_by_token(&token)
            .await?
            .ok_or(VouchersServiceError::PurchaseNotFound)?;

        Span::current().record("purchase_uuid", tracing::field::display(purchase.uuid));

        if purchase.is_redeemed() {
            return Err(VouchersServiceError::AlreadyRedeemed);
        }

        if self.purchases.mark_redeemed(&token, redeemed_at).await? {
            info!("voucher redeemed");

            return Ok(());
        }

        // Lost a race with another redemption, or the row changed underneath us.
        match self.purchases.get_purchase_by_token(&token).await? {
            Some(current) if current.is_redeemed() => Err(VouchersServiceError::AlreadyRedeemed),
            Some(_) => {
                warn!("conditional redeem matched no rows while purchase is still active");

                Err(StoreError::UpdateNotApplied.into())
            }
            None => Err(VouchersServiceError::PurchaseNotFound),
        }
    }

    #[tracing::instrument(
        name = "vouchers.service.list_user_vouchers",
        skip(self),
        fields(buyer_id = %buyer),
        err
    )]
    async fn list_user_vouchers(
        &self,
        buyer: UserId,
    ) -> Result<Vec<PurchaseView>, VouchersServiceError> {
        validate_user("user_id", buyer)?;

        let records = self.purchases.list_user_vouchers(buyer).await?;

        Ok(records.into_iter().map(PurchaseView::from).collect())
    }

    #[tracing::instrument(
        name = "vouchers.service.list_buyer_purchases",
        skip(self),
        fields(buyer_id = %buyer),
        err
    )]
    async fn list_buyer_purchases(
        &self,
        buyer: UserId,
    ) -> Result<Vec<PurchaseRecord>, VouchersServiceError> {
        validate_user("buyer_id", buyer)?;

        Ok(self.purchases.list_purchases_by_buyer(buyer).await?)
    }

    #[tracing::instrument(
        name = "vouchers.service.list_listing_owner_vouchers",
        skip(self),
        fields(user_id = %owner),
        err
    )]
    async fn list_listing_owner_vouchers(
        &self,
        owner: UserId,
    ) -> Result<Vec<VoucherRecord>, VouchersServiceError> {
        validate_user("user_id", owner)?;

        Ok(self.vouchers.list_vouchers_by_owner(owner).await?)
    }
}

#[automock]
#[async_trait]
pub trait VouchersService: Send + Sync {
    /// Issue a new voucher for a listing.
    async fn create_voucher(
        &self,
        draft: VoucherDraft,
    ) -> Result<VoucherRecord, VouchersServiceError>;

    /// Buy a voucher. Each voucher can be bought once.
    async fn purchase_voucher(
        &self,
        voucher: VoucherUuid,
        buyer: UserId,
    ) -> Result<PurchaseRecord, VouchersServiceError>;

    /// Redeem the purchase holding `token`. Each purchase can be redeemed once.
    async fn redeem_voucher(
        &self,
        token: RedemptionToken,
        redeemed_at: Timestamp,
    ) -> Result<(), VouchersServiceError>;

    /// A buyer's purchased vouchers, newest first.
    async fn list_user_vouchers(
        &self,
        buyer: UserId,
    ) -> Result<Vec<PurchaseView>, VouchersServiceError>;

    /// Raw purchase records for a buyer, newest first, tokens included.
    async fn list_buyer_purchases(
        &self,
        buyer: UserId,
    ) -> Result<Vec<PurchaseRecord>, VouchersServiceError>;

    /// Vouchers issued by a listing owner, newest first.
    async fn list_listing_owner_vouchers(
        &self,
        owner: UserId,
    ) -> Result<Vec<VoucherRecord>, VouchersServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::predicate::eq;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{
            lifecycle::errors::ErrorKind,
            purchases::{MockPurchaseStore, records::PurchaseStatus},
            users::ListingId,
            vouchers::MockVoucherStore,
        },
        tokens::MockTokenGenerator,
    };

    use super::*;

    fn draft(title: &str, price: Decimal) -> VoucherDraft {
        VoucherDraft {
            listing_id: ListingId::new(10),
            user_id: UserId::new(1),
            title: title.to_string(),
            description: None,
            price,
            photo_url: None,
        }
    }

    fn voucher_record(uuid: VoucherUuid) -> VoucherRecord {
        VoucherRecord {
            uuid,
            listing_id: ListingId::new(10),
            user_id: UserId::new(1),
            title: "10% off".to_string(),
            description: None,
            price: Decimal::new(500, 2),
            photo_url: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn purchase_record(voucher: VoucherUuid, status: PurchaseStatus) -> PurchaseRecord {
        PurchaseRecord {
            uuid: PurchaseUuid::from_uuid(Uuid::now_v7()),
            voucher_uuid: voucher,
            buyer_id: UserId::new(7),
            redemption_token: RedemptionToken::from("vr_token".to_string()),
            status,
            redeemed_at: match status {
                PurchaseStatus::Active => None,
                PurchaseStatus::Redeemed => Some(Timestamp::UNIX_EPOCH),
            },
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn lifecycle(
        vouchers: MockVoucherStore,
        purchases: MockPurchaseStore,
        tokens: MockTokenGenerator,
    ) -> VoucherLifecycle {
        VoucherLifecycle::new(Arc::new(vouchers), Arc::new(purchases), Arc::new(tokens))
    }

    fn token() -> RedemptionToken {
        RedemptionToken::from("vr_token".to_string())
    }

    #[tokio::test]
    async fn create_voucher_uses_generated_identifier() -> TestResult {
        let id = Uuid::now_v7();
        let mut vouchers = MockVoucherStore::new();
        let mut tokens = MockTokenGenerator::new();

        tokens.expect_identifier().once().return_const(id);

        vouchers
            .expect_create_voucher()
            .once()
            .withf(move |voucher| voucher.uuid.into_uuid() == id && voucher.title == "10% off")
            .returning(|voucher| {
                Ok(VoucherRecord {
                    uuid: voucher.uuid,
                    listing_id: voucher.listing_id,
                    user_id: voucher.user_id,
                    title: voucher.title,
                    description: voucher.description,
                    price: voucher.price,
                    photo_url: voucher.photo_url,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let service = lifecycle(vouchers, MockPurchaseStore::new(), tokens);

        let created = service
            .create_voucher(draft("10% off", Decimal::new(500, 2)))
            .await?;

        assert_eq!(created.uuid.into_uuid(), id);
        assert_eq!(created.price, Decimal::new(500, 2));

        Ok(())
    }

    #[tokio::test]
    async fn create_voucher_rejects_invalid_drafts_before_storing() {
        let service = lifecycle(
            MockVoucherStore::new(),
            MockPurchaseStore::new(),
            MockTokenGenerator::new(),
        );

        let mut bad_listing = draft("ok", Decimal::ZERO);
        bad_listing.listing_id = ListingId::new(0);

        let mut bad_user = draft("ok", Decimal::ZERO);
        bad_user.user_id = UserId::new(-1);

        for draft in [
            bad_listing,
            bad_user,
            draft("   ", Decimal::ZERO),
            draft("ok", Decimal::new(-1, 2)),
        ] {
            let result = service.create_voucher(draft).await;

            assert!(
                matches!(&result, Err(error) if error.kind() == ErrorKind::Validation),
                "expected validation error, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn create_voucher_accepts_free_vouchers() -> TestResult {
        let mut vouchers = MockVoucherStore::new();
        let mut tokens = MockTokenGenerator::new();

        tokens.expect_identifier().return_const(Uuid::now_v7());
        vouchers
            .expect_create_voucher()
            .once()
            .returning(|voucher| Ok(voucher_record(voucher.uuid)));

        let service = lifecycle(vouchers, MockPurchaseStore::new(), tokens);

        service
            .create_voucher(draft("Free coffee", Decimal::ZERO))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn purchase_rejects_nil_voucher_and_non_positive_buyer() {
        let service = lifecycle(
            MockVoucherStore::new(),
            MockPurchaseStore::new(),
            MockTokenGenerator::new(),
        );

        let nil = service
            .purchase_voucher(VoucherUuid::from_uuid(Uuid::nil()), UserId::new(7))
            .await;
        let buyer = service
            .purchase_voucher(VoucherUuid::from_uuid(Uuid::now_v7()), UserId::new(0))
            .await;

        assert!(matches!(nil, Err(VouchersServiceError::Invalid { field: "voucher_id", .. })));
        assert!(matches!(buyer, Err(VouchersServiceError::Invalid { field: "buyer_id", .. })));
    }

    #[tokio::test]
    async fn purchase_of_unknown_voucher_is_not_found() {
        let mut vouchers = MockVoucherStore::new();

        vouchers.expect_get_voucher().returning(|_| Ok(None));

        let service = lifecycle(vouchers, MockPurchaseStore::new(), MockTokenGenerator::new());

        let result = service
            .purchase_voucher(VoucherUuid::from_uuid(Uuid::now_v7()), UserId::new(7))
            .await;

        assert!(matches!(result, Err(VouchersServiceError::VoucherNotFound)));
    }

    #[tokio::test]
    async fn purchase_of_bought_voucher_conflicts() {
        let voucher = VoucherUuid::from_uuid(Uuid::now_v7());
        let mut vouchers = MockVoucherStore::new();
        let mut purchases = MockPurchaseStore::new();

        vouchers
            .expect_get_voucher()
            .returning(move |uuid| Ok(Some(voucher_record(uuid))));
        purchases
            .expect_get_purchase_by_voucher()
            .with(eq(voucher))
            .returning(|uuid| Ok(Some(purchase_record(uuid, PurchaseStatus::Active))));
        purchases.expect_create_purchase().never();

        let service = lifecycle(vouchers, purchases, MockTokenGenerator::new());

        let result = service.purchase_voucher(voucher, UserId::new(8)).await;

        assert!(matches!(result, Err(VouchersServiceError::AlreadyPurchased)));
    }

    #[tokio::test]
    async fn purchase_losing_the_insert_race_conflicts() {
        let mut vouchers = MockVoucherStore::new();
        let mut purchases = MockPurchaseStore::new();
        let mut tokens = MockTokenGenerator::new();

        vouchers
            .expect_get_voucher()
            .returning(|uuid| Ok(Some(voucher_record(uuid))));
        purchases
            .expect_get_purchase_by_voucher()
            .returning(|_| Ok(None));
        purchases
            .expect_create_purchase()
            .returning(|_| Err(StoreError::Duplicate(UniqueKey::PurchaseVoucher)));
        tokens.expect_identifier().return_const(Uuid::now_v7());
        tokens.expect_redemption_token().returning(token);

        let service = lifecycle(vouchers, purchases, tokens);

        let result = service
            .purchase_voucher(VoucherUuid::from_uuid(Uuid::now_v7()), UserId::new(7))
            .await;

        assert!(matches!(result, Err(VouchersServiceError::AlreadyPurchased)));
    }

    #[tokio::test]
    async fn purchase_issues_fresh_token_distinct_from_voucher_id() -> TestResult {
        let voucher = VoucherUuid::from_uuid(Uuid::now_v7());
        let mut vouchers = MockVoucherStore::new();
        let mut purchases = MockPurchaseStore::new();
        let mut tokens = MockTokenGenerator::new();

        vouchers
            .expect_get_voucher()
            .returning(|uuid| Ok(Some(voucher_record(uuid))));
        purchases
            .expect_get_purchase_by_voucher()
            .returning(|_| Ok(None));
        tokens.expect_identifier().return_const(Uuid::now_v7());
        tokens
            .expect_redemption_token()
            .once()
            .returning(|| RedemptionToken::from("vr_fresh".to_string()));
        purchases
            .expect_create_purchase()
            .once()
            .withf(move |purchase| {
                purchase.voucher_uuid == voucher
                    && purchase.buyer_id == UserId::new(7)
                    && purchase.redemption_token.as_str() == "vr_fresh"
            })
            .returning(|purchase| {
                Ok(PurchaseRecord {
                    uuid: purchase.uuid,
                    voucher_uuid: purchase.voucher_uuid,
                    buyer_id: purchase.buyer_id,
                    redemption_token: purchase.redemption_token.clone(),
                    status: PurchaseStatus::Active,
                    redeemed_at: None,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let service = lifecycle(vouchers, purchases, tokens);

        let purchase = service.purchase_voucher(voucher, UserId::new(7)).await?;

        assert_eq!(purchase.status, PurchaseStatus::Active);
        assert_ne!(purchase.redemption_token.as_str(), voucher.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn redeem_rejects_blank_token() {
        let service = lifecycle(
            MockVoucherStore::new(),
            MockPurchaseStore::new(),
            MockTokenGenerator::new(),
        );

        let result = service
            .redeem_voucher(RedemptionToken::from("  ".to_string()), Timestamp::now())
            .await;

        assert!(matches!(result, Err(VouchersServiceError::Invalid { .. })));
    }

    #[tokio::test]
    async fn redeem_with_unknown_token_is_not_found() {
        let mut purchases = MockPurchaseStore::new();

        purchases
            .expect_get_purchase_by_token()
            .returning(|_| Ok(None));
        purchases.expect_mark_redeemed().never();

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        let result = service.redeem_voucher(token(), Timestamp::now()).await;

        assert!(matches!(result, Err(VouchersServiceError::PurchaseNotFound)));
    }

    #[tokio::test]
    async fn redeem_of_redeemed_purchase_conflicts_without_writing() {
        let mut purchases = MockPurchaseStore::new();

        purchases.expect_get_purchase_by_token().returning(|_| {
            Ok(Some(purchase_record(
                VoucherUuid::from_uuid(Uuid::now_v7()),
                PurchaseStatus::Redeemed,
            )))
        });
        purchases.expect_mark_redeemed().never();

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        let result = service.redeem_voucher(token(), Timestamp::now()).await;

        assert!(matches!(result, Err(VouchersServiceError::AlreadyRedeemed)));
    }

    #[tokio::test]
    async fn redeem_passes_timestamp_to_conditional_update() -> TestResult {
        let redeemed_at = Timestamp::from_second(1_767_225_600)?;
        let mut purchases = MockPurchaseStore::new();

        purchases.expect_get_purchase_by_token().returning(|_| {
            Ok(Some(purchase_record(
                VoucherUuid::from_uuid(Uuid::now_v7()),
                PurchaseStatus::Active,
            )))
        });
        purchases
            .expect_mark_redeemed()
            .once()
            .withf(move |token, at| token.as_str() == "vr_token" && *at == redeemed_at)
            .returning(|_, _| Ok(true));

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        service.redeem_voucher(token(), redeemed_at).await?;

        Ok(())
    }

    #[tokio::test]
    async fn redeem_losing_the_race_reports_conflict() {
        let voucher = VoucherUuid::from_uuid(Uuid::now_v7());
        let mut purchases = MockPurchaseStore::new();
        let mut seq = mockall::Sequence::new();

        purchases
            .expect_get_purchase_by_token()
            .once()
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(purchase_record(voucher, PurchaseStatus::Active))));
        purchases
            .expect_mark_redeemed()
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(false));
        purchases
            .expect_get_purchase_by_token()
            .once()
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(purchase_record(voucher, PurchaseStatus::Redeemed))));

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        let result = service.redeem_voucher(token(), Timestamp::now()).await;

        assert!(matches!(result, Err(VouchersServiceError::AlreadyRedeemed)));
    }

    #[tokio::test]
    async fn redeem_missed_update_on_active_purchase_is_a_storage_error() {
        let voucher = VoucherUuid::from_uuid(Uuid::now_v7());
        let mut purchases = MockPurchaseStore::new();

        purchases
            .expect_get_purchase_by_token()
            .times(2)
            .returning(move |_| Ok(Some(purchase_record(voucher, PurchaseStatus::Active))));
        purchases.expect_mark_redeemed().returning(|_, _| Ok(false));

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        let result = service.redeem_voucher(token(), Timestamp::now()).await;

        assert!(matches!(
            result,
            Err(VouchersServiceError::Storage(StoreError::UpdateNotApplied))
        ));
    }

    #[tokio::test]
    async fn redeem_of_vanished_purchase_is_not_found() {
        let voucher = VoucherUuid::from_uuid(Uuid::now_v7());
        let mut purchases = MockPurchaseStore::new();
        let mut seq = mockall::Sequence::new();

        purchases
            .expect_get_purchase_by_token()
            .once()
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(purchase_record(voucher, PurchaseStatus::Active))));
        purchases
            .expect_mark_redeemed()
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(false));
        purchases
            .expect_get_purchase_by_token()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        let result = service.redeem_voucher(token(), Timestamp::now()).await;

        assert!(matches!(result, Err(VouchersServiceError::PurchaseNotFound)));
    }

    #[tokio::test]
    async fn store_timeouts_surface_as_storage_errors() {
        let mut purchases = MockPurchaseStore::new();

        purchases
            .expect_get_purchase_by_token()
            .returning(|_| Err(StoreError::Timeout(Duration::from_millis(50))));

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        let result = service.redeem_voucher(token(), Timestamp::now()).await;

        assert!(matches!(&result, Err(error) if error.kind() == ErrorKind::Storage && error.is_timeout()));
    }

    #[tokio::test]
    async fn list_user_vouchers_rejects_non_positive_buyer() {
        let service = lifecycle(
            MockVoucherStore::new(),
            MockPurchaseStore::new(),
            MockTokenGenerator::new(),
        );

        let result = service.list_user_vouchers(UserId::new(0)).await;

        assert!(matches!(result, Err(VouchersServiceError::Invalid { .. })));
    }

    #[tokio::test]
    async fn list_buyer_purchases_reads_the_buyer_scope() -> TestResult {
        let voucher = VoucherUuid::from_uuid(Uuid::now_v7());
        let mut purchases = MockPurchaseStore::new();

        purchases
            .expect_list_purchases_by_buyer()
            .once()
            .with(eq(UserId::new(7)))
            .returning(move |_| {
                Ok(vec![
                    purchase_record(voucher, PurchaseStatus::Redeemed),
                    purchase_record(voucher, PurchaseStatus::Active),
                ])
            });

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        let listed = service.list_buyer_purchases(UserId::new(7)).await?;

        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|purchase| purchase.voucher_uuid == voucher));

        Ok(())
    }

    #[tokio::test]
    async fn list_buyer_purchases_rejects_non_positive_buyer() {
        let mut purchases = MockPurchaseStore::new();

        purchases.expect_list_purchases_by_buyer().never();

        let service = lifecycle(MockVoucherStore::new(), purchases, MockTokenGenerator::new());

        let result = service.list_buyer_purchases(UserId::new(-3)).await;

        assert!(matches!(result, Err(VouchersServiceError::Invalid { .. })));
    }

    #[tokio::test]
    async fn list_listing_owner_vouchers_delegates_to_store() -> TestResult {
        let uuid = VoucherUuid::from_uuid(Uuid::now_v7());
        let mut vouchers = MockVoucherStore::new();

        vouchers
            .expect_list_vouchers_by_owner()
            .with(eq(UserId::new(1)))
            .returning(move |_| Ok(vec![voucher_record(uuid)]));

        let service = lifecycle(vouchers, MockPurchaseStore::new(), MockTokenGenerator::new());

        let listed = service.list_listing_owner_vouchers(UserId::new(1)).await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].uuid, uuid);

        Ok(())
    }
}
