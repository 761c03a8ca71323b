mod tenant_resolver;
