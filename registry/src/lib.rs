use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    event::EventRepositoryImpl, health::HealthCheckRepositoryImpl, matches::MatchRepositoryImpl,
    program::ProgramRepositoryImpl, registration::RegistrationRepositoryImpl,
    tournament::TournamentRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::model::access::ForbiddenDisclosure;
use kernel::model::auth::TokenProvider;
use kernel::repository::{
    event::EventRepository, health::HealthCheckRepository, matches::MatchRepository,
    program::ProgramRepository, registration::RegistrationRepository,
    tournament::TournamentRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    event_repository: Arc<dyn EventRepository>,
    program_repository: Arc<dyn ProgramRepository>,
    tournament_repository: Arc<dyn TournamentRepository>,
    match_repository: Arc<dyn MatchRepository>,
    registration_repository: Arc<dyn RegistrationRepository>,
    user_repository: Arc<dyn UserRepository>,
    token_provider: Arc<TokenProvider>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let disclosure = ForbiddenDisclosure::from_conceal_flag(app_config.access.conceal_forbidden);
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone(), disclosure));
        let program_repository = Arc::new(ProgramRepositoryImpl::new(pool.clone(), disclosure));
        let tournament_repository =
            Arc::new(TournamentRepositoryImpl::new(pool.clone(), disclosure));
        let match_repository = Arc::new(MatchRepositoryImpl::new(pool.clone(), disclosure));
        let registration_repository =
            Arc::new(RegistrationRepositoryImpl::new(pool.clone(), disclosure));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let token_provider = Arc::new(TokenProvider::new(&app_config.auth));
        Self {
            health_check_repository,
            event_repository,
            program_repository,
            tournament_repository,
            match_repository,
            registration_repository,
            user_repository,
            token_provider,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn program_repository(&self) -> Arc<dyn ProgramRepository> {
        self.program_repository.clone()
    }

    pub fn tournament_repository(&self) -> Arc<dyn TournamentRepository> {
        self.tournament_repository.clone()
    }

    pub fn match_repository(&self) -> Arc<dyn MatchRepository> {
        self.match_repository.clone()
    }

    pub fn registration_repository(&self) -> Arc<dyn RegistrationRepository> {
        self.registration_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn token_provider(&self) -> Arc<TokenProvider> {
        self.token_provider.clone()
    }
}
