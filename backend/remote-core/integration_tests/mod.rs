mod bootstrap;
mod http_jobs;
mod support;
