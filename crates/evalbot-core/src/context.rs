use evalbot_config::Config;
use evalbot_database_interface::DbService;
use evalbot_ghapi_interface::ApiService;

use crate::CoreModule;

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub api_service: &'a (dyn ApiService + 'a),
    pub db_service: &'a (dyn DbService + 'a),
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use evalbot_config::Config;
    use evalbot_database_memory::MemoryDb;
    use evalbot_ghapi_interface::MockApiService;

    use crate::{CoreContext, CoreModule};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub api_service: MockApiService,
        pub db_service: MemoryDb,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            Self {
                config: Config::from_env_no_version().unwrap(),
                core_module: CoreModule::builder().build(),
                api_service: MockApiService::new(),
                db_service: MemoryDb::new(),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                api_service: &self.api_service,
                db_service: &self.db_service,
            }
        }
    }
}
