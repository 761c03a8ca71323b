pub mod authenticated_tenant;
