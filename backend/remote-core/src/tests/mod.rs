mod config;
mod manager;
mod support;
