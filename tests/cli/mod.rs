mod argument_parsing;
mod feed_run;
mod toml_config;
