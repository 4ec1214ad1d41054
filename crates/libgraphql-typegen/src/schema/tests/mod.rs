mod schema_document;
