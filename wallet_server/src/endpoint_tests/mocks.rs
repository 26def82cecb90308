use mockall::mock;
use wallet_engine::{
    db_types::{Deposit, NewUser, Transaction, User},
    traits::{AccountApiError, AccountManagement, AuthApiError, AuthManagement, LedgerApiError, LedgerManagement},
};

use crate::integrations::{GatewayOrder, NewGatewayOrder, PaymentGateway, PaymentGatewayError};

mock! {
    pub AccountManager {}
    impl AccountManagement for AccountManager {
        async fn fetch_user_by_id(&self, user_id: i64) -> Result<Option<User>, AccountApiError>;
        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, AccountApiError>;
        async fn fetch_recent_transactions(&self, user_id: i64, limit: u32) -> Result<Vec<Transaction>, AccountApiError>;
    }
}

mock! {
    pub AuthManager {}
    impl AuthManagement for AuthManager {
        async fn fetch_login_details(&self, email: &str) -> Result<Option<User>, AuthApiError>;
    }
}

mock! {
    pub LedgerManager {}
    impl LedgerManagement for LedgerManager {
        async fn credit_deposit(&self, user_id: i64, deposit: &Deposit) -> Result<(User, Transaction), LedgerApiError>;
        async fn register_with_deposit(&self, user: NewUser, deposit: &Deposit) -> Result<(User, Transaction), LedgerApiError>;
    }
}

mock! {
    pub Gateway {}
    impl PaymentGateway for Gateway {
        async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, PaymentGatewayError>;
        async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentGatewayError>;
    }
}
