mod merge_resolver_module;
mod resolver_updates;
