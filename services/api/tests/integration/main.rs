mod health_test;
mod helpers;
mod identity_test;
mod users_test;
