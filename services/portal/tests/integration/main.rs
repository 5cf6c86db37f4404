mod chat_test;
mod helpers;
mod router_test;
