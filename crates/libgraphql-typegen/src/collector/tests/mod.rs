mod directive_collector;
