mod helpers;
mod mocks;
mod payments;
mod user_data;
