mod health_test;
mod tickets_test;
