//! Initial database migration.
//!
//! Creates the enums, tables, indexes, and timestamp triggers for the
//! job-board and credit-ledger schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CATALOG
        // ============================================================
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(PRODUCT_PRICES_SQL).await?;

        // ============================================================
        // PART 3: CREDIT LEDGER
        // ============================================================
        db.execute_unprepared(CREDIT_ACCOUNTS_SQL).await?;
        db.execute_unprepared(CREDIT_TRANSACTIONS_SQL).await?;
        db.execute_unprepared(DOCUMENT_SEQUENCES_SQL).await?;

        // ============================================================
        // PART 4: JOBS & WORKFLOW WRAPPERS
        // ============================================================
        db.execute_unprepared(JOBS_SQL).await?;
        db.execute_unprepared(ADMIN_JOBS_SQL).await?;
        db.execute_unprepared(OFFLINE_JOBS_SQL).await?;
        db.execute_unprepared(PUBLISHED_JOBS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Ledger movement type
CREATE TYPE trx_type AS ENUM (
    'top_up',
    'refund',
    'complimentary',
    'utilization',
    'expired'
);

-- Credit account status
CREATE TYPE account_status AS ENUM (
    'active',
    'expired',
    'terminated',
    'deleted'
);

-- Active/deleted flag shared by soft-deletable rows
CREATE TYPE record_status AS ENUM (
    'active',
    'deleted'
);

-- Posting wrapper status
CREATE TYPE wrapper_status AS ENUM (
    'pending',
    'active',
    'deleted'
);

-- Publication indicator
CREATE TYPE publish_ind AS ENUM (
    'new',
    'published',
    'unpublished',
    'republished'
);

-- ProductPrice classification
CREATE TYPE price_type AS ENUM (
    'credit_bundle',
    'credit_utilization'
);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY,
    code VARCHAR(64) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    status record_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PRODUCT_PRICES_SQL: &str = r"
CREATE TABLE product_prices (
    id UUID PRIMARY KEY,
    product_id UUID NOT NULL REFERENCES products(id),
    price_type price_type NOT NULL,
    unit_credit_value NUMERIC(19, 4) NOT NULL CHECK (unit_credit_value >= 0),
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    effective_date_start DATE NOT NULL,
    effective_date_end DATE NOT NULL,
    published BOOLEAN NOT NULL DEFAULT false,
    status record_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (effective_date_end >= effective_date_start)
);

CREATE INDEX idx_product_prices_product ON product_prices(product_id);
CREATE INDEX idx_product_prices_effective
    ON product_prices(price_type, published, effective_date_start, effective_date_end);
";

const CREDIT_ACCOUNTS_SQL: &str = r"
CREATE TABLE credit_accounts (
    id UUID PRIMARY KEY,
    recruiter_id UUID NOT NULL UNIQUE,
    credit_balance NUMERIC(19, 4) NOT NULL DEFAULT 0 CHECK (credit_balance >= 0),
    credit_locked NUMERIC(19, 4) NOT NULL DEFAULT 0 CHECK (credit_locked >= 0),
    status account_status NOT NULL DEFAULT 'active',
    last_trx_date TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CREDIT_TRANSACTIONS_SQL: &str = r"
CREATE TABLE credit_transactions (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES credit_accounts(id),
    trx_type trx_type NOT NULL,
    trx_date TIMESTAMPTZ NOT NULL,
    total_credit NUMERIC(19, 4) NOT NULL,
    total_credit_available NUMERIC(19, 4) NOT NULL DEFAULT 0
        CHECK (total_credit_available >= 0),
    product_id UUID,
    product_price_id UUID REFERENCES product_prices(id),
    job_id UUID,
    document_number BIGINT,
    status record_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- FIFO drain scans: drainable lots for one account, oldest first
CREATE INDEX idx_credit_trx_fifo
    ON credit_transactions(account_id, trx_date)
    WHERE total_credit_available > 0 AND status = 'active';

CREATE INDEX idx_credit_trx_account ON credit_transactions(account_id);
";

const DOCUMENT_SEQUENCES_SQL: &str = r"
CREATE TABLE document_sequences (
    key VARCHAR(64) PRIMARY KEY,
    current BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const JOBS_SQL: &str = r"
CREATE TABLE jobs (
    id UUID PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    location VARCHAR(255) NOT NULL,
    employer_name VARCHAR(255) NOT NULL,
    content TEXT NOT NULL,
    publish_start DATE NOT NULL,
    publish_end DATE NOT NULL,
    status record_status NOT NULL DEFAULT 'active',
    created_by UUID NOT NULL,
    updated_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (publish_end >= publish_start)
);
";

const ADMIN_JOBS_SQL: &str = r"
CREATE TABLE admin_jobs (
    id UUID PRIMARY KEY,
    job_id UUID NOT NULL REFERENCES jobs(id),
    status wrapper_status NOT NULL DEFAULT 'pending',
    publish_ind publish_ind NOT NULL DEFAULT 'new',
    last_publish_date TIMESTAMPTZ,
    created_by UUID NOT NULL,
    updated_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_admin_jobs_job ON admin_jobs(job_id);
CREATE INDEX idx_admin_jobs_state ON admin_jobs(status, publish_ind);
";

const OFFLINE_JOBS_SQL: &str = r"
CREATE TABLE offline_jobs (
    id UUID PRIMARY KEY,
    job_id UUID NOT NULL REFERENCES jobs(id),
    recruiter_id UUID NOT NULL,
    product_price_id UUID NOT NULL REFERENCES product_prices(id),
    credit_trx_id UUID REFERENCES credit_transactions(id),
    status wrapper_status NOT NULL DEFAULT 'pending',
    publish_ind publish_ind NOT NULL DEFAULT 'new',
    last_publish_date TIMESTAMPTZ,
    created_by UUID NOT NULL,
    updated_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_offline_jobs_job ON offline_jobs(job_id);
CREATE INDEX idx_offline_jobs_recruiter ON offline_jobs(recruiter_id);
CREATE INDEX idx_offline_jobs_state ON offline_jobs(status, publish_ind);
";

const PUBLISHED_JOBS_SQL: &str = r"
CREATE TABLE published_jobs (
    id UUID PRIMARY KEY,
    job_id UUID NOT NULL REFERENCES jobs(id),
    title VARCHAR(255) NOT NULL,
    employer_name VARCHAR(255) NOT NULL,
    location VARCHAR(255) NOT NULL,
    publish_start DATE NOT NULL,
    publish_end DATE NOT NULL,
    weight INTEGER NOT NULL,
    status record_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- At most one live snapshot per job
CREATE UNIQUE INDEX idx_published_jobs_one_active
    ON published_jobs(job_id)
    WHERE status = 'active';

CREATE INDEX idx_published_jobs_listing
    ON published_jobs(weight, publish_start)
    WHERE status = 'active';
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_products_updated_at
    BEFORE UPDATE ON products
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_product_prices_updated_at
    BEFORE UPDATE ON product_prices
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_credit_accounts_updated_at
    BEFORE UPDATE ON credit_accounts
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_credit_transactions_updated_at
    BEFORE UPDATE ON credit_transactions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_jobs_updated_at
    BEFORE UPDATE ON jobs
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_admin_jobs_updated_at
    BEFORE UPDATE ON admin_jobs
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_offline_jobs_updated_at
    BEFORE UPDATE ON offline_jobs
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_published_jobs_updated_at
    BEFORE UPDATE ON published_jobs
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS published_jobs CASCADE;
DROP TABLE IF EXISTS offline_jobs CASCADE;
DROP TABLE IF EXISTS admin_jobs CASCADE;
DROP TABLE IF EXISTS jobs CASCADE;
DROP TABLE IF EXISTS document_sequences CASCADE;
DROP TABLE IF EXISTS credit_transactions CASCADE;
DROP TABLE IF EXISTS credit_accounts CASCADE;
DROP TABLE IF EXISTS product_prices CASCADE;
DROP TABLE IF EXISTS products CASCADE;

DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS price_type;
DROP TYPE IF EXISTS publish_ind;
DROP TYPE IF EXISTS wrapper_status;
DROP TYPE IF EXISTS record_status;
DROP TYPE IF EXISTS account_status;
DROP TYPE IF EXISTS trx_type;
";
