pub use mediator::DefaultAsyncMediator;

use crate::facade::QueryFacade;

pub type AppMediator = DefaultAsyncMediator;

/// Register every item command and query handler against one facade
pub fn build_mediator(facade: QueryFacade) -> AppMediator {
    DefaultAsyncMediator::builder()
        .add_handler({
            let facade = facade.clone();
            move |cmd| {
                let facade = facade.clone();
                async move { crate::features::items::commands::create::handle(facade, cmd).await }
            }
        })
        .add_handler({
            let facade = facade.clone();
            move |cmd| {
                let facade = facade.clone();
                async move { crate::features::items::commands::update::handle(facade, cmd).await }
            }
        })
        .add_handler({
            let facade = facade.clone();
            move |cmd| {
                let facade = facade.clone();
                async move { crate::features::items::commands::delete::handle(facade, cmd).await }
            }
        })
        .add_handler({
            let facade = facade.clone();
            move |query| {
                let facade = facade.clone();
                async move { crate::features::items::queries::list::handle(facade, query).await }
            }
        })
        .build()
}
