//! Purchases Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::Db,
    domain::{
        purchases::{
            data::NewPurchase,
            records::{PurchaseRecord, PurchaseStatus, PurchaseUuid, UserVoucherRecord},
            store::PurchaseStore,
        },
        store::StoreError,
        users::UserId,
        vouchers::records::VoucherUuid,
    },
    tokens::RedemptionToken,
};

const CREATE_PURCHASE_SQL: &str = include_str!("sql/create_purchase.sql");
const GET_PURCHASE_BY_VOUCHER_SQL: &str = include_str!("sql/get_purchase_by_voucher.sql");
const GET_PURCHASE_BY_TOKEN_SQL: &str = include_str!("sql/get_purchase_by_token.sql");
const LIST_PURCHASES_BY_BUYER_SQL: &str = include_str!("sql/list_purchases_by_buyer.sql");
const LIST_USER_VOUCHERS_SQL: &str = include_str!("sql/list_user_vouchers.sql");
const MARK_REDEEMED_SQL: &str = include_str!("sql/mark_redeemed.sql");

#[derive(Debug, Clone)]
pub struct PgPurchaseStore {
    db: Db,
}

impl PgPurchaseStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PurchaseStore for PgPurchaseStore {
    async fn create_purchase(&self, purchase: NewPurchase) -> Result<PurchaseRecord, StoreError> {
        self.db
            .bounded(
                query_as::<Postgres, PurchaseRecord>(CREATE_PURCHASE_SQL)
                    .bind(purchase.uuid.into_uuid())
                    .bind(purchase.voucher_uuid.into_uuid())
                    .bind(purchase.buyer_id.get())
                    .bind(purchase.redemption_token.as_str())
                    .fetch_one(self.db.pool()),
            )
            .await
    }

    async fn get_purchase_by_voucher(
        &self,
        voucher: VoucherUuid,
    ) -> Result<Option<PurchaseRecord>, StoreError> {
        self.db
            .bounded(
                query_as::<Postgres, PurchaseRecord>(GET_PURCHASE_BY_VOUCHER_SQL)
                    .bind(voucher.into_uuid())
                    .fetch_optional(self.db.pool()),
            )
            .await
    }

    async fn get_purchase_by_token(
        &self,
        token: &RedemptionToken,
    ) -> Result<Option<PurchaseRecord>, StoreError> {
        self.db
            .bounded(
                query_as::<Postgres, PurchaseRecord>(GET_PURCHASE_BY_TOKEN_SQL)
                    .bind(token.as_str())
                    .fetch_optional(self.db.pool()),
            )
            .await
    }

    async fn list_purchases_by_buyer(
        &self,
        buyer: UserId,
    ) -> Result<Vec<PurchaseRecord>, StoreError> {
        self.db
            .bounded(
                query_as::<Postgres, PurchaseRecord>(LIST_PURCHASES_BY_BUYER_SQL)
                    .bind(buyer.get())
                    .fetch_all(self.db.pool()),
            )
            .await
    }

    async fn list_user_vouchers(
        &self,
        buyer: UserId,
    ) -> Result<Vec<UserVoucherRecord>, StoreError> {
        self.db
            .bounded(
                query_as::<Postgres, UserVoucherRecord>(LIST_USER_VOUCHERS_SQL)
                    .bind(buyer.get())
                    .fetch_all(self.db.pool()),
            )
            .await
    }

    async fn mark_redeemed(
        &self,
        token: &RedemptionToken,
        redeemed_at: Timestamp,
    ) -> Result<bool, StoreError> {
        let rows_affected = self
            .db
            .bounded(
                query(MARK_REDEEMED_SQL)
                    .bind(token.as_str())
                    .bind(SqlxTimestamp::from(redeemed_at))
                    .execute(self.db.pool()),
            )
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

fn decode_status(row: &PgRow) -> sqlx::Result<PurchaseStatus> {
    let status: String = row.try_get("status")?;

    status
        .parse::<PurchaseStatus>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for PurchaseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PurchaseUuid::from_uuid(row.try_get("uuid")?),
            voucher_uuid: VoucherUuid::from_uuid(row.try_get("voucher_uuid")?),
            buyer_id: UserId::new(row.try_get("buyer_id")?),
            redemption_token: RedemptionToken::from(row.try_get::<String, _>("redemption_token")?),
            status: decode_status(row)?,
            redeemed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("redeemed_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserVoucherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            purchase_uuid: PurchaseUuid::from_uuid(row.try_get("uuid")?),
            voucher_uuid: VoucherUuid::from_uuid(row.try_get("voucher_uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            photo_url: row.try_get("photo_url")?,
            price: row.try_get("price")?,
            status: decode_status(row)?,
            purchased_at: row.try_get::<SqlxTimestamp, _>("purchased_at")?.to_jiff(),
            redeemed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("redeemed_at")?
                .map(SqlxTimestamp::to_jiff),
            redemption_token: row
                .try_get::<Option<String>, _>("redemption_token")?
                .map(RedemptionToken::from),
        })
    }
}
