pub mod dynamo_test_utils;
pub mod http_test_utils;
pub mod mock_catalog_store;
pub mod mock_join_event_store;
pub mod mock_order_store;
pub mod mock_phone_number_store;
pub mod mock_user_store;
pub mod test_logging;
