use nt_inference::ClassifierAdapter;
use nt_ratings::RatingMatcher;
use nt_search::Corroborator;

pub struct AppState {
    pub corroborator: Corroborator,
    pub classifier: ClassifierAdapter,
    pub ratings: RatingMatcher,
}
