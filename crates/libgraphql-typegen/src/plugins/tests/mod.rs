mod context_plugin;
