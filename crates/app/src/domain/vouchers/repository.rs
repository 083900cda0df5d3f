//! Vouchers Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::Db,
    domain::{
        store::StoreError,
        users::{ListingId, UserId},
        vouchers::{
            data::NewVoucher,
            records::{VoucherRecord, VoucherUuid},
            store::VoucherStore,
        },
    },
};

const CREATE_VOUCHER_SQL: &str = include_str!("sql/create_voucher.sql");
const GET_VOUCHER_SQL: &str = include_str!("sql/get_voucher.sql");
const LIST_VOUCHERS_BY_OWNER_SQL: &str = include_str!("sql/list_vouchers_by_owner.sql");

#[derive(Debug, Clone)]
pub struct PgVoucherStore {
    db: Db,
}

impl PgVoucherStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VoucherStore for PgVoucherStore {
    async fn create_voucher(&self, voucher: NewVoucher) -> Result<VoucherRecord, StoreError> {
        self.db
            .bounded(
                query_as::<Postgres, VoucherRecord>(CREATE_VOUCHER_SQL)
                    .bind(voucher.uuid.into_uuid())
                    .bind(voucher.listing_id.get())
                    .bind(voucher.user_id.get())
                    .bind(voucher.title)
                    .bind(voucher.description)
                    .bind(voucher.price)
                    .bind(voucher.photo_url)
                    .fetch_one(self.db.pool()),
            )
            .await
    }

    async fn get_voucher(
        &self,
        voucher: VoucherUuid,
    ) -> Result<Option<VoucherRecord>, StoreError> {
        self.db
            .bounded(
                query_as::<Postgres, VoucherRecord>(GET_VOUCHER_SQL)
                    .bind(voucher.into_uuid())
                    .fetch_optional(self.db.pool()),
            )
            .await
    }

    async fn list_vouchers_by_owner(
        &self,
        user: UserId,
    ) -> Result<Vec<VoucherRecord>, StoreError> {
        self.db
            .bounded(
                query_as::<Postgres, VoucherRecord>(LIST_VOUCHERS_BY_OWNER_SQL)
                    .bind(user.get())
                    .fetch_all(self.db.pool()),
            )
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for VoucherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VoucherUuid::from_uuid(row.try_get("uuid")?),
            listing_id: ListingId::new(row.try_get("listing_id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: row.try_get::<Decimal, _>("price")?,
            photo_url: row.try_get("photo_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
