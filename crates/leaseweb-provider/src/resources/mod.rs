pub mod dedicated_server;
