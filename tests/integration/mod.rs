/// Integration tests for the HTTP API and server wiring
mod api_tests;
mod server_tests;
