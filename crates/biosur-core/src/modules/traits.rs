use super::engine::Characterization;
use crate::domain::{Sample, SurrogateResult};

pub trait SurrogateModel {
    fn characterize(&self, sample: &Sample) -> SurrogateResult<Characterization>;
}

impl<T> SurrogateModel for &T
where
    T: SurrogateModel + ?Sized,
{
    fn characterize(&self, sample: &Sample) -> SurrogateResult<Characterization> {
        (**self).characterize(sample)
    }
}
