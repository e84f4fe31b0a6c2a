mod logger;
mod support;
