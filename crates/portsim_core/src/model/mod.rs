mod ids;
mod results;
mod series;
mod weights;

pub use ids::{SimulationId, Ticker};
pub use results::{
    DistributionParams, SimulationBatch, SimulationPath, SimulationSummary, SummaryEntry,
};
pub use series::{PortfolioReturnSeries, PricePoint, PriceSeries, ReturnPoint, ReturnSeries};
pub use weights::{PortfolioWeights, WEIGHT_TOLERANCE};
