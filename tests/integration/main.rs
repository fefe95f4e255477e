//! Integration tests with a mock HTTP server

mod migration;
mod mock_server;
