/*!

The shape of a network: which family it belongs to and its size parameters. The shape gives the distance between two addresses without exploring the network.

* `Ring { k: 5 }` has addresses `0..k` around a cycle.
* `Torus { sides: [k1,k2] }`, or `Torus { k: 4 }` for a square one, has the address `x+k1*y` for the coordinates `(x,y)`.
* `Star { hubs: 1, spokes: 3 }` has hubs linked to every node and spokes linked only to hubs.

*/

pub mod cartesian;
pub mod star;

use crate::config::ConfigurationValue;
use crate::error::Error;
use crate::network::Network;
use crate::{match_object,source_location};
use self::cartesian::{CartesianData,ring_distance};
use self::star::star_distance;

///The topology families with their parameters.
#[derive(Clone,Debug,PartialEq,Eq)]
pub enum Shape
{
	Ring{
		k: usize,
	},
	Torus{
		cartesian_data: CartesianData,
	},
	Star{
		hubs: usize,
		spokes: usize,
	},
}

impl Shape
{
	pub fn ring(k:usize) -> Result<Shape,Error>
	{
		if k==0
		{
			return Err(Error::invalid_shape(source_location!(),"a ring needs at least one node".to_string()));
		}
		Ok(Shape::Ring{k})
	}
	pub fn torus(k1:usize, k2:usize) -> Result<Shape,Error>
	{
		if k1==0 || k2==0
		{
			return Err(Error::invalid_shape(source_location!(),format!("a torus cannot have a side of zero, got {}x{}",k1,k2)));
		}
		Ok(Shape::Torus{cartesian_data:CartesianData::new(&[k1,k2])})
	}
	pub fn star(hubs:usize, spokes:usize) -> Result<Shape,Error>
	{
		if hubs==0
		{
			return Err(Error::invalid_shape(source_location!(),"a star needs at least one hub".to_string()));
		}
		Ok(Shape::Star{hubs,spokes})
	}
	pub fn name(&self) -> &'static str
	{
		match self
		{
			Shape::Ring{..} => "Ring",
			Shape::Torus{..} => "Torus",
			Shape::Star{..} => "Star",
		}
	}
	pub fn num_nodes(&self) -> usize
	{
		match self
		{
			&Shape::Ring{k} => k,
			&Shape::Torus{ref cartesian_data} => cartesian_data.size,
			&Shape::Star{hubs,spokes} => hubs+spokes,
		}
	}
	///Fails unless `network` has exactly the nodes of this shape.
	pub fn check_network(&self, network:&dyn Network) -> Result<(),Error>
	{
		let expected=self.num_nodes();
		let found=network.num_nodes();
		if expected!=found
		{
			return Err(Error::shape_mismatch(source_location!(),expected,found).with_message(format!("checking a {} shape",self.name())));
		}
		Ok(())
	}
	fn check_address(&self, address:usize) -> Result<(),Error>
	{
		let n=self.num_nodes();
		if address<n { Ok(()) } else { Err(Error::unknown_address(source_location!(),address,n)) }
	}
	///Hops from `a` to `b`. In a star, hubs are the nodes of `network` linked to all others.
	pub fn distance(&self, network:&dyn Network, a:usize, b:usize) -> Result<usize,Error>
	{
		self.check_address(a)?;
		self.check_address(b)?;
		match self
		{
			&Shape::Ring{k} => Ok(ring_distance(a,b,k)),
			&Shape::Torus{ref cartesian_data} => Ok(cartesian_data.torus_distance(cartesian_data.unpack(a),cartesian_data.unpack(b))),
			&Shape::Star{..} =>
			{
				if a==b
				{
					return Ok(0);
				}
				Ok(star_distance(network.is_hub(a)?,network.is_hub(b)?))
			},
		}
	}
	///The `[x,y]` coordinates of a torus address. `None` for other shapes.
	pub fn torus_coordinates(&self, address:usize) -> Option<Result<[usize;2],Error>>
	{
		match self
		{
			Shape::Torus{cartesian_data} => Some(cartesian_data.coordinates(address)),
			_ => None,
		}
	}
	///The torus address at `[x,y]`. `None` for other shapes.
	pub fn torus_address(&self, coordinates:[usize;2]) -> Option<Result<usize,Error>>
	{
		match self
		{
			Shape::Torus{cartesian_data} => Some(cartesian_data.address(coordinates)),
			_ => None,
		}
	}
}

///Build the shape of a `Ring`, `Torus` or `Star` object. The `paths` field of these objects is for the network and ignored here.
pub fn new_shape(cv:&ConfigurationValue) -> Result<Shape,Error>
{
	let (cv_name,_cv_pairs)=cv.as_object()?;
	let missing=|field:&str|Error::ill_formed_configuration(source_location!(),cv.clone()).with_message(format!("There were no {} in {}",field,cv_name));
	match cv_name
	{
		"Ring" =>
		{
			let mut k=None;
			match_object!(cv,"Ring",value,
				"k" => k=Some(value.as_usize()?),
				"paths" => (),
			);
			Shape::ring(k.ok_or_else(||missing("k"))?)
		},
		"Torus" =>
		{
			let mut sides=None;
			match_object!(cv,"Torus",value,
				"sides" => sides=Some(value.as_array()?.iter().map(|v|v.as_usize()).collect::<Result<Vec<usize>,Error>>()?),
				"k" => { let k=value.as_usize()?; sides=Some(vec![k,k]) },
				"paths" => (),
			);
			let sides=sides.ok_or_else(||missing("sides"))?;
			if sides.len()!=2
			{
				return Err(Error::ill_formed_configuration(source_location!(),cv.clone()).with_message(format!("a Torus needs exactly two sides, got {}",sides.len())));
			}
			Shape::torus(sides[0],sides[1])
		},
		"Star" =>
		{
			let mut hubs=None;
			let mut spokes=None;
			match_object!(cv,"Star",value,
				"hubs" => hubs=Some(value.as_usize()?),
				"spokes" => spokes=Some(value.as_usize()?),
				"paths" => (),
			);
			Shape::star(hubs.ok_or_else(||missing("hubs"))?,spokes.ok_or_else(||missing("spokes"))?)
		},
		_ => Err(Error::unknown_topology(source_location!(),cv_name.to_string())),
	}
}
