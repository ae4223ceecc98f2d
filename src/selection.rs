/*!

Selection of one candidate among several, shared by the routings.

The candidates pass through three filters, each building a new list:
1. keep those with the lowest `score`,
2. of those, keep the ones with the lowest `secondary` key,
3. pick one of the survivors uniformly at random.

This is not the same as minimizing the pair `(score,secondary)`: the second filter only sees what survived the first.

*/

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

use crate::error::Error;
use crate::source_location;

///Something to select plus the values by which it is compared.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Candidate<T>
{
	pub choice: T,
	///Lower is better.
	pub score: usize,
	///Lower is better among equal `score`.
	pub secondary: usize,
}

impl<T> Candidate<T>
{
	pub fn new(choice:T, score:usize, secondary:usize) -> Candidate<T>
	{
		Candidate{
			choice,
			score,
			secondary,
		}
	}
}

///Keep the candidates whose `key` is minimum. Does not solve ties.
pub fn retain_minimum<T,F:Fn(&Candidate<T>)->usize>(candidates:Vec<Candidate<T>>, key:F) -> Vec<Candidate<T>>
{
	let mut best=vec![];
	let mut best_value=usize::MAX;
	for candidate in candidates.into_iter()
	{
		let value=key(&candidate);
		if best.is_empty() || value<best_value
		{
			best_value=value;
			best=vec![candidate];
		}
		else if value==best_value
		{
			best.push(candidate);
		}
	}
	best
}

///Keep the candidates of minimum score.
pub fn lowest_score<T>(candidates:Vec<Candidate<T>>) -> Vec<Candidate<T>>
{
	retain_minimum(candidates,|candidate|candidate.score)
}

///Keep the candidates of minimum secondary key.
pub fn lowest_secondary<T>(candidates:Vec<Candidate<T>>) -> Vec<Candidate<T>>
{
	retain_minimum(candidates,|candidate|candidate.secondary)
}

///Take one candidate at random. The random number generator is only used when there are several.
pub fn random_choice<T>(mut candidates:Vec<Candidate<T>>, rng:&RefCell<StdRng>) -> Result<Candidate<T>,Error>
{
	match candidates.len()
	{
		0 => Err(Error::empty_candidate_list(source_location!())),
		1 => Ok(candidates.swap_remove(0)),
		n =>
		{
			let index=rng.borrow_mut().gen_range(0..n);
			Ok(candidates.swap_remove(index))
		},
	}
}

///Apply the full selection: lowest score, then lowest secondary key, then random.
pub fn select<T>(candidates:Vec<Candidate<T>>, rng:&RefCell<StdRng>) -> Result<Candidate<T>,Error>
{
	if candidates.is_empty()
	{
		return Err(Error::empty_candidate_list(source_location!()));
	}
	let offered=candidates.len();
	let by_score=lowest_score(candidates);
	let by_score_count=by_score.len();
	let survivors=lowest_secondary(by_score);
	trace!(offered,by_score=by_score_count,survivors=survivors.len(),"selection filters applied");
	random_choice(survivors,rng)
}
