use std::error::Error;
use std::sync::Arc;

use nidi::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let container = Container::init(AppModule::new("greeter")).unwrap();
    let app: Arc<App> = container.get("app").unwrap();
    app.run();

    let request = container.child(RequestModule::new("Ferris")).unwrap();
    let greet = inline!["greeter.english", "user.name" => |greeter: Arc<dyn Greeter>, name: &'static str| {
        greeter.greet_user(name);
    }];
    request.invoke(&greet).unwrap();
}

struct AppModule {
    app_name: &'static str,
}

impl AppModule {
    fn new(app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Module for AppModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        bind("app_name").to_value(self.app_name).set_on(configurer);

        bind("logger")
            .to_component::<ConsoleLogger>()
            .set_on(configurer);

        bind("greeter.english")
            .to_component::<EnglishGreeter>()
            .set_on(configurer);

        bind("greeter.chinese")
            .to_component::<ChineseGreeter>()
            .set_on(configurer);

        bind("greeters")
            .to_factory(
                Annotated::new(|english: Arc<dyn Greeter>, chinese: Arc<dyn Greeter>| {
                    vec![english, chinese]
                })
                .inject(["greeter.english", "greeter.chinese"]),
            )
            .set_on(configurer);

        bind("app").to_component::<App>().set_on(configurer);

        Ok(())
    }
}

struct RequestModule {
    user_name: &'static str,
}

impl RequestModule {
    fn new(user_name: &'static str) -> Self {
        Self { user_name }
    }
}

impl Module for RequestModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        bind("user.name").to_value(self.user_name).set_on(configurer);
        Ok(())
    }
}

trait Logger: Send + Sync + 'static {
    fn log(&self, message: &str);
}

struct ConsoleLogger {
    app_name: &'static str,
}

#[component(Arc<dyn Logger>, Arc::new)]
impl ConsoleLogger {
    #[inject]
    pub fn new(#[named("app_name")] app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        eprintln!("[{}] {}", self.app_name, message);
    }
}

trait Greeter: Send + Sync + 'static {
    fn greet(&self);

    fn greet_user(&self, name: &str);
}

struct EnglishGreeter {
    logger: Arc<dyn Logger>,
}

#[component(Arc<dyn Greeter>, Arc::new)]
impl EnglishGreeter {
    #[inject("logger")]
    fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Greeter for EnglishGreeter {
    fn greet(&self) {
        self.logger.log("Hello World!");
    }

    fn greet_user(&self, name: &str) {
        self.logger.log(&format!("Hello {name}!"));
    }
}

struct ChineseGreeter {
    logger: Arc<dyn Logger>,
}

#[component(Arc<dyn Greeter>, Arc::new)]
impl ChineseGreeter {
    #[inject("logger")]
    fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Greeter for ChineseGreeter {
    fn greet(&self) {
        self.logger.log("你好世界!");
    }

    fn greet_user(&self, name: &str) {
        self.logger.log(&format!("你好, {name}!"));
    }
}

struct App {
    logger: Arc<dyn Logger>,
    greeters: Vec<Arc<dyn Greeter>>,
}

#[component(Arc<App>, Arc::new)]
impl App {
    #[inject("logger", "greeters")]
    fn new(logger: Arc<dyn Logger>, greeters: Vec<Arc<dyn Greeter>>) -> Self {
        Self { logger, greeters }
    }

    fn run(&self) {
        self.logger.log("Greeting from nidi managed objects:");
        for greeter in &self.greeters {
            greeter.greet();
        }
    }
}
