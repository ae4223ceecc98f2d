
use crate::error::Error;
use crate::source_location;

///A Cartesian rectangle of two dimensions, with the nodes numbered along the first side.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct CartesianData
{
	pub sides: [usize;2],
	pub size: usize,
}

impl CartesianData
{
	pub fn new(sides:&[usize;2]) -> CartesianData
	{
		CartesianData{
			sides: *sides,
			size: sides[0]*sides[1],
		}
	}
	///The coordinates `[x,y]` of an address.
	pub fn unpack(&self, address:usize) -> [usize;2]
	{
		[address%self.sides[0], (address/self.sides[0])%self.sides[1]]
	}
	///The address at coordinates `[x,y]`.
	pub fn pack(&self, coordinates:[usize;2]) -> usize
	{
		coordinates[0] + coordinates[1]*self.sides[0]
	}
	///Like `unpack`, but failing for addresses outside the rectangle.
	pub fn coordinates(&self, address:usize) -> Result<[usize;2],Error>
	{
		if address<self.size
		{
			Ok(self.unpack(address))
		}
		else
		{
			Err(Error::unknown_address(source_location!(),address,self.size))
		}
	}
	///Like `pack`, but failing for coordinates outside the rectangle.
	pub fn address(&self, coordinates:[usize;2]) -> Result<usize,Error>
	{
		for dimension in 0..2
		{
			if coordinates[dimension]>=self.sides[dimension]
			{
				return Err(Error::unknown_address(source_location!(),coordinates[dimension],self.sides[dimension])
					.with_message(format!("coordinate {} out of the side {} of dimension {}",coordinates[dimension],self.sides[dimension],dimension)));
			}
		}
		Ok(self.pack(coordinates))
	}
	///Sum over both dimensions of the distance along each of the cycles.
	pub fn torus_distance(&self, origin:[usize;2], destination:[usize;2]) -> usize
	{
		(0..2).map(|dimension|ring_distance(origin[dimension],destination[dimension],self.sides[dimension])).sum()
	}
}

///Hops between `a` and `b` in a cycle of `k` nodes: the shorter of the two arcs.
pub fn ring_distance(a:usize, b:usize, k:usize) -> usize
{
	let clockwise=(k + b%k - a%k) % k;
	let counterclockwise=(k - clockwise) % k;
	clockwise.min(counterclockwise)
}

///Signed hops to go from `a` to `b` in a cycle of `k` nodes along the shorter arc.
///Positive means increasing addresses. When both arcs have equal length the increasing one is chosen.
pub fn ring_offset(a:usize, b:usize, k:usize) -> i64
{
	let clockwise=(k + b%k - a%k) % k;
	let counterclockwise=(k - clockwise) % k;
	if clockwise<=counterclockwise { clockwise as i64 } else { -(counterclockwise as i64) }
}
